use std::fs::remove_dir_all;
use std::path::PathBuf;

use anyhow::Context;
use brief_store::ObjectStore;
use chrono::Utc;

use crate::{
    collect_new_entries, script, summarize_entries, FeedCursor, FeedSource, SpeechSynthesizer,
    Summarizer, Summary,
};

pub mod builder;

// The core briefing pipeline: cursor -> feeds -> summaries -> audio -> publish
pub struct BriefingProcessor<O, F, S, A>
where
    O: ObjectStore + Send + Sync + 'static,
    F: FeedSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: SpeechSynthesizer + Send + Sync + 'static,
{
    workdir: PathBuf,
    store: O,
    feed_source: F,
    summarizer: S,
    synthesizer: A,
    feed_urls: Vec<String>,
}

impl<O, F, S, A> BriefingProcessor<O, F, S, A>
where
    O: ObjectStore + Send + Sync + 'static,
    F: FeedSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: SpeechSynthesizer + Send + Sync + 'static,
{
    /// Object holding the per-feed cursor mapping in the bucket.
    const CURSOR_OBJECT: &'static str = "last_processed_entries.json";

    /// Reads the stored cursor. A missing or unparseable cursor object means
    /// starting fresh; a storage failure is fatal.
    #[tracing::instrument(skip(self))]
    async fn load_cursor(&self) -> anyhow::Result<FeedCursor> {
        let bytes = match self
            .store
            .download(Self::CURSOR_OBJECT)
            .await
            .context("Failed to read cursor object")?
        {
            Some(bytes) => bytes,
            None => {
                tracing::info!("No cursor object yet, starting fresh");
                return Ok(FeedCursor::default());
            }
        };

        match FeedCursor::parse(&bytes) {
            Ok(cursor) => Ok(cursor),
            Err(e) => {
                tracing::warn!(error = %e, "Could not parse cursor object, starting fresh");
                Ok(FeedCursor::default())
            }
        }
    }

    /// Synthesizes the script one unit at a time and stitches the segments,
    /// in generation order, into a single MP3 byte stream. Segment files
    /// land under the scratch dir, which `Drop` removes on every path.
    #[tracing::instrument(skip_all, fields(summaries = summaries.len()))]
    async fn synthesize_briefing(&self, summaries: &[Summary]) -> anyhow::Result<Vec<u8>> {
        let units = script::build_script(summaries);
        let segments_dir = self.workdir.join("segments");
        std::fs::create_dir_all(&segments_dir)
            .with_context(|| format!("Failed to create scratch dir {}", segments_dir.display()))?;

        let mut stitched = Vec::new();
        for (idx, unit) in units.iter().enumerate() {
            let segment = self
                .synthesizer
                .synthesize(unit)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to synthesize segment {idx}: {e:?}"))?;

            let segment_path = segments_dir.join(format!("segment_{idx:03}.mp3"));
            std::fs::write(&segment_path, &segment)
                .with_context(|| format!("Failed to write {}", segment_path.display()))?;

            stitched.extend_from_slice(&segment);
        }

        Ok(stitched)
    }

    /// Runs the pipeline once.
    ///
    /// Precondition: exactly one invocation at a time. The cursor object is
    /// overwritten unconditionally on success, so concurrent runs could
    /// regress each other's watermarks.
    #[tracing::instrument(skip(self))]
    pub async fn run(self) -> anyhow::Result<()> {
        let cursor = self.load_cursor().await?;

        let (entries, updated_cursor) =
            collect_new_entries(&self.feed_source, &self.feed_urls, &cursor).await;
        if entries.is_empty() {
            tracing::info!("No new entries found");
            return Ok(());
        }
        tracing::info!(count = entries.len(), "Summarizing new entries");

        let summaries = summarize_entries(&self.summarizer, &entries).await;

        let audio = self.synthesize_briefing(&summaries).await?;

        // A second run on the same day overwrites the day's artifact.
        let object_name = format!("summary-{}.mp3", Utc::now().format("%Y-%m-%d"));
        self.store
            .upload(&object_name, audio, "audio/mpeg")
            .await
            .with_context(|| format!("Failed to publish {object_name}"))?;

        let cursor_json = updated_cursor
            .to_json_pretty()
            .context("Failed to serialize cursor")?;
        self.store
            .upload(Self::CURSOR_OBJECT, cursor_json.into_bytes(), "application/json")
            .await
            .context("Failed to persist cursor")?;

        tracing::info!(url = %self.store.public_url(&object_name), "Published briefing");
        Ok(())
    }
}

impl<O, F, S, A> Drop for BriefingProcessor<O, F, S, A>
where
    O: ObjectStore + Send + Sync + 'static,
    F: FeedSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: SpeechSynthesizer + Send + Sync + 'static,
{
    fn drop(&mut self) {
        let segments_dir = self.workdir.join("segments");

        if segments_dir.exists() {
            if let Err(e) = remove_dir_all(&segments_dir) {
                tracing::warn!(error = ?e, path = ?segments_dir, "Failed to clean up scratch directory");
            } else {
                tracing::info!(path = ?segments_dir, "Cleaned up scratch directory");
            }
        }
    }
}
