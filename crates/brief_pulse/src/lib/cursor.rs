use std::collections::HashMap;

use serde::Serialize;

/// Per-feed watermark: feed URL mapped to the epoch-second timestamp of the
/// last entry a successful run processed. Persisted as one JSON object in
/// the bucket and overwritten wholesale after each successful publish.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FeedCursor(HashMap<String, i64>);

impl FeedCursor {
    /// Accepts integer or float epoch values; earlier deployments wrote the
    /// timestamps as floats. Fractional seconds are truncated.
    pub fn parse(bytes: &[u8]) -> serde_json::Result<Self> {
        let raw: HashMap<String, f64> = serde_json::from_slice(bytes)?;
        Ok(Self(raw.into_iter().map(|(k, v)| (k, v as i64)).collect()))
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Timestamp of the last processed entry for `feed_url`; epoch 0 for
    /// feeds never seen before.
    pub fn last_seen(&self, feed_url: &str) -> i64 {
        self.0.get(feed_url).copied().unwrap_or(0)
    }

    /// Raises the watermark for `feed_url` to `timestamp` if it is newer.
    /// Watermarks never regress.
    pub fn observe(&mut self, feed_url: &str, timestamp: i64) {
        let current = self.0.entry(feed_url.to_string()).or_insert(0);
        if timestamp > *current {
            *current = timestamp;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_feed_defaults_to_epoch_zero() {
        let cursor = FeedCursor::default();
        assert_eq!(cursor.last_seen("https://example.com/feed.xml"), 0);
    }

    #[test]
    fn observe_keeps_the_maximum_timestamp() {
        let mut cursor = FeedCursor::default();
        cursor.observe("a", 100);
        cursor.observe("a", 80);
        assert_eq!(cursor.last_seen("a"), 100);
        cursor.observe("a", 180);
        assert_eq!(cursor.last_seen("a"), 180);
    }

    #[test]
    fn round_trips_through_pretty_json() {
        let mut cursor = FeedCursor::default();
        cursor.observe("https://a.example/rss", 180);
        cursor.observe("https://b.example/rss", 200);

        let json = cursor.to_json_pretty().unwrap();
        let parsed = FeedCursor::parse(json.as_bytes()).unwrap();
        assert_eq!(parsed, cursor);
    }

    #[test]
    fn parses_float_timestamps_from_earlier_deployments() {
        let legacy = br#"{"https://a.example/rss": 180.0, "https://b.example/rss": 200.7}"#;
        let cursor = FeedCursor::parse(legacy).unwrap();
        assert_eq!(cursor.last_seen("https://a.example/rss"), 180);
        assert_eq!(cursor.last_seen("https://b.example/rss"), 200);
    }

    #[test]
    fn garbage_bytes_fail_to_parse() {
        assert!(FeedCursor::parse(b"{not json").is_err());
        assert!(FeedCursor::parse(b"[1, 2, 3]").is_err());
    }
}
