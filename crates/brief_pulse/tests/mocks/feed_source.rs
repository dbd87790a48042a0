use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use brief_pulse::{Entry, FeedSource};
use chrono::DateTime;

#[derive(Clone, Default)]
pub struct MockFeedSource {
    pub feeds: HashMap<String, Vec<Entry>>,
    pub failing_urls: HashSet<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockFeedSource {
    pub fn with_feed(mut self, url: &str, entries: Vec<Entry>) -> Self {
        self.feeds.insert(url.to_string(), entries);
        self
    }

    pub fn with_failing_url(mut self, url: &str) -> Self {
        self.failing_urls.insert(url.to_string());
        self
    }
}

impl FeedSource for MockFeedSource {
    async fn fetch_feed(&self, url: &str) -> anyhow::Result<Vec<Entry>> {
        self.calls.lock().unwrap().push(url.to_string());
        if self.failing_urls.contains(url) {
            return Err(anyhow::anyhow!("connection timed out: {url}"));
        }
        Ok(self.feeds.get(url).cloned().unwrap_or_default())
    }
}

/// An entry published at `timestamp` epoch seconds.
pub fn entry(feed_url: &str, title: &str, timestamp: i64) -> Entry {
    Entry {
        feed_url: feed_url.to_string(),
        title: title.to_string(),
        published: DateTime::from_timestamp(timestamp, 0).expect("valid timestamp"),
        content: format!("{title} body text"),
    }
}
