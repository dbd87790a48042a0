pub mod feed_source;
pub mod object_store;
pub mod summarizer;
pub mod synthesizer;
