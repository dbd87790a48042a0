use std::cmp::Reverse;
use std::future::Future;
use std::ops::Deref;
use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, Utc};
use itertools::Itertools;

use crate::FeedCursor;

/// Entries per feed kept in a single run. Anything older waits for the
/// backlog to drain across runs rather than flooding one briefing.
pub const MAX_ENTRIES_PER_FEED: usize = 3;

/// One syndication feed item, alive only within a single run.
#[derive(Debug, Clone)]
pub struct Entry {
    pub feed_url: String,
    pub title: String,
    pub published: DateTime<Utc>,
    pub content: String,
}

pub trait FeedSource {
    fn fetch_feed(&self, url: &str) -> impl Future<Output = anyhow::Result<Vec<Entry>>>;
}

impl<T: FeedSource + Send + Sync> FeedSource for &T {
    async fn fetch_feed(&self, url: &str) -> anyhow::Result<Vec<Entry>> {
        (**self).fetch_feed(url).await
    }
}

/// Fetches feeds over HTTP and parses them with feed-rs.
pub struct HttpFeedSource(pub reqwest::Client);

impl Default for HttpFeedSource {
    fn default() -> Self {
        Self(reqwest::Client::new())
    }
}

impl Deref for HttpFeedSource {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl HttpFeedSource {
    const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

    /// Some publishers reject default HTTP-library agents outright.
    const USER_AGENT: &'static str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
}

impl FeedSource for HttpFeedSource {
    async fn fetch_feed(&self, url: &str) -> anyhow::Result<Vec<Entry>> {
        let body = self
            .get(url)
            .header("User-Agent", Self::USER_AGENT)
            .timeout(Self::FETCH_TIMEOUT)
            .send()
            .await?
            .error_for_status()
            .with_context(|| format!("Feed request rejected: {url}"))?
            .bytes()
            .await?;

        parse_entries(url, &body)
    }
}

/// Parses a feed document into entries. Entries without a parseable publish
/// time are dropped here; there is no sane place to order them.
fn parse_entries(url: &str, body: &[u8]) -> anyhow::Result<Vec<Entry>> {
    let feed = feed_rs::parser::parse(body).with_context(|| format!("Failed to parse feed: {url}"))?;

    let entries = feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let published = entry.published.or(entry.updated)?;
            let content = entry
                .content
                .and_then(|c| c.body)
                .or_else(|| entry.summary.map(|s| s.content))
                .unwrap_or_default();

            Some(Entry {
                feed_url: url.to_string(),
                title: entry.title.map(|t| t.content).unwrap_or_default(),
                published,
                content,
            })
        })
        .collect();

    Ok(entries)
}

/// Fetches every configured feed and returns the new entries in global
/// chronological order, together with the advanced cursor candidate.
///
/// A feed that fails to fetch or parse is skipped for this run; the error
/// surfaces here, in one place, as a logged per-feed result. An empty output
/// is the normal "nothing to do" outcome, not an error.
pub async fn collect_new_entries<F: FeedSource>(
    source: &F,
    feed_urls: &[String],
    cursor: &FeedCursor,
) -> (Vec<Entry>, FeedCursor) {
    let mut updated = cursor.clone();
    let mut combined = Vec::new();

    for url in feed_urls {
        tracing::info!(feed = %url, "Fetching feed");

        let entries = match source.fetch_feed(url).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = ?e, feed = %url, "Skipping feed for this run");
                continue;
            }
        };

        let last_seen = cursor.last_seen(url);
        let fresh = entries
            .into_iter()
            .filter(|e| e.published.timestamp() > last_seen)
            .collect::<Vec<_>>();

        for entry in &fresh {
            updated.observe(url, entry.published.timestamp());
        }

        combined.extend(
            fresh
                .into_iter()
                .sorted_by_key(|e| Reverse(e.published))
                .take(MAX_ENTRIES_PER_FEED),
        );
    }

    combined.sort_by_key(|e| e.published);
    (combined, updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS_DOC: &str = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Test feed</title>
    <item>
      <title>Dated story</title>
      <pubDate>Thu, 15 Feb 2024 06:00:00 GMT</pubDate>
      <description>Short summary here.</description>
    </item>
    <item>
      <title>Undated story</title>
      <description>No pubDate on this one.</description>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn entries_without_publish_time_are_skipped() {
        let entries = parse_entries("https://t.example/rss", RSS_DOC.as_bytes()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Dated story");
        assert_eq!(entries[0].content, "Short summary here.");
        assert_eq!(entries[0].feed_url, "https://t.example/rss");
    }

    #[test]
    fn unparseable_documents_are_an_error() {
        assert!(parse_entries("https://t.example/rss", b"this is not xml").is_err());
    }
}
