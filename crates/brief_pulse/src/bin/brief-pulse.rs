use std::path::PathBuf;

use anyhow::Context;
use brief_pulse::{
    tracing::init_tracing_subscriber, BriefingProcessorBuilder, GeminiClient, GoogleTtsClient,
    HttpFeedSource,
};
use brief_store::{GcsStore, MetadataTokenSource, SecretManagerClient};
use clap::Parser;

const DEFAULT_FEEDS: &str = "https://deepmind.google/blog/rss.xml,\
https://raw.githubusercontent.com/Olshansk/rss-feeds/main/feeds/feed_anthropic_news.xml,\
https://openai.com/blog/rss.xml,\
https://simonwillison.net/atom/everything/";

#[derive(Parser)]
#[command(name = "brief-pulse", about = "RSS-to-audio briefing pipeline")]
struct Cli {
    /// Bucket holding the cursor and published briefings
    #[arg(long, env = "GCS_BUCKET_NAME")]
    bucket: String,

    /// Google Cloud project that owns the Gemini API key secret
    #[arg(long, env = "PROJECT_ID")]
    project_id: String,

    /// Feed URLs to ingest
    #[arg(long, env = "RSS_FEEDS", value_delimiter = ',', default_value = DEFAULT_FEEDS)]
    feeds: Vec<String>,

    /// Secret Manager name of the Gemini API key
    #[arg(long, env = "GEMINI_SECRET_NAME", default_value = "gemini-api-key")]
    gemini_secret: String,

    /// Working directory for intermediate audio segments
    #[arg(long, default_value = "/var/tmp/brief-pulse")]
    workdir: PathBuf,
}

struct Config {
    bucket: String,
    project_id: String,
    feeds: Vec<String>,
    gemini_secret: String,
    workdir: PathBuf,
}

async fn run_pipeline(config: &Config) -> anyhow::Result<()> {
    let secrets = SecretManagerClient::new(MetadataTokenSource::default());
    let gemini_key = secrets
        .access_latest(&config.project_id, &config.gemini_secret)
        .await
        .context("Failed to fetch the Gemini API key")?;

    let processor = BriefingProcessorBuilder::new(&config.workdir)
        .store(GcsStore::new(&config.bucket, MetadataTokenSource::default()))
        .feed_source(HttpFeedSource::default())
        .summarizer(GeminiClient::new(gemini_key))
        .synthesizer(GoogleTtsClient::new(MetadataTokenSource::default()))
        .feed_urls(config.feeds.clone())
        .build();

    processor.run().await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let config = Config {
        bucket: cli.bucket,
        project_id: cli.project_id,
        feeds: cli.feeds,
        gemini_secret: cli.gemini_secret,
        workdir: cli.workdir,
    };

    tracing::info!(feeds = config.feeds.len(), "Running briefing pipeline...");
    run_pipeline(&config).await
}
