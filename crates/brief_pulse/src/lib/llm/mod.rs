use std::fmt::Debug;
use std::future::Future;

use crate::Entry;

pub mod gemini;

/// Substituted whenever summarization of a single entry fails. Failures
/// never abort the batch.
pub const PLACEHOLDER_SUMMARY: &str = "Summary not available.";

/// One summarized entry, in the same position as its source `Entry`.
#[derive(Debug, Clone)]
pub struct Summary {
    pub title: String,
    pub text: String,
}

pub trait Summarizer {
    const SUMMARIZER_MODEL: &'static str;

    type Error: Debug;

    fn summarize(
        &self,
        title: &str,
        content: &str,
    ) -> impl Future<Output = Result<String, Self::Error>>;
}

impl<T: Summarizer + Send + Sync> Summarizer for &T {
    const SUMMARIZER_MODEL: &'static str = T::SUMMARIZER_MODEL;

    type Error = T::Error;

    async fn summarize(&self, title: &str, content: &str) -> Result<String, Self::Error> {
        (**self).summarize(title, content).await
    }
}

/// Summarizes each entry in order, yielding exactly one `Summary` per
/// `Entry`. The per-item result is resolved here and nowhere else: an `Err`
/// becomes the placeholder text and the batch carries on.
pub async fn summarize_entries<S: Summarizer>(summarizer: &S, entries: &[Entry]) -> Vec<Summary> {
    let mut summaries = Vec::with_capacity(entries.len());

    for entry in entries {
        let text = match summarizer.summarize(&entry.title, &entry.content).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = ?e, title = %entry.title, "Failed to summarize entry");
                PLACEHOLDER_SUMMARY.to_string()
            }
        };

        summaries.push(Summary {
            title: entry.title.clone(),
            text,
        });
    }

    summaries
}
