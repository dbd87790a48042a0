use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use brief_pulse::Summarizer;

#[derive(Clone, Default)]
pub struct MockSummarizer {
    /// Entry titles, in call order.
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_titles: HashSet<String>,
}

impl MockSummarizer {
    pub fn failing_for(mut self, title: &str) -> Self {
        self.fail_titles.insert(title.to_string());
        self
    }
}

impl Summarizer for MockSummarizer {
    const SUMMARIZER_MODEL: &'static str = "mock-gemini";

    type Error = anyhow::Error;

    async fn summarize(&self, title: &str, _content: &str) -> Result<String, Self::Error> {
        self.calls.lock().unwrap().push(title.to_string());
        if self.fail_titles.contains(title) {
            return Err(anyhow::anyhow!("model rate limited"));
        }
        Ok(format!("Summary of {title}."))
    }
}
