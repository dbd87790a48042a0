mod cursor;
mod feeds;
mod llm;
mod processor;
pub mod tracing;
mod tts;

pub use cursor::FeedCursor;
pub use feeds::{collect_new_entries, Entry, FeedSource, HttpFeedSource};
pub use llm::{
    gemini::GeminiClient, summarize_entries, Summarizer, Summary, PLACEHOLDER_SUMMARY,
};
pub use processor::{builder::BriefingProcessorBuilder, BriefingProcessor};
pub use tts::{google::GoogleTtsClient, script, SpeechSynthesizer};
