//! History record types and timestamp helpers.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Public engagement counters for one post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct PostMetrics {
    /// Times the post was shown
    #[serde(default)]
    impressions: u64,
    /// Likes
    #[serde(default)]
    likes: u64,
    /// Reposts
    #[serde(default)]
    retweets: u64,
    /// Replies
    #[serde(default)]
    replies: u64,
}

impl PostMetrics {
    /// Create a metrics snapshot.
    pub fn new(impressions: u64, likes: u64, retweets: u64, replies: u64) -> Self {
        Self {
            impressions,
            likes,
            retweets,
            replies,
        }
    }

    /// Likes, reposts and replies combined.
    pub fn engagements(&self) -> u64 {
        self.likes + self.retweets + self.replies
    }
}

/// One entry of the post history.
///
/// Field order is also the CSV column order on export.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct ContentRecord {
    /// Identifier returned by the posting API, or a synthesized dry-run id
    id: String,

    /// Posted text
    content: String,

    /// Creation time, ISO-8601 in UTC
    #[builder(default = "format_timestamp(Utc::now())")]
    timestamp: String,

    /// Category tag
    #[builder(default = "default_category()")]
    #[serde(default = "default_category")]
    category: String,

    /// Times the post was shown
    #[builder(default)]
    #[serde(default)]
    impressions: u64,

    /// Likes
    #[builder(default)]
    #[serde(default)]
    likes: u64,

    /// Reposts
    #[builder(default)]
    #[serde(default)]
    retweets: u64,

    /// Replies
    #[builder(default)]
    #[serde(default)]
    replies: u64,

    /// Whether the post went out (or was simulated)
    #[builder(default = "true")]
    #[serde(default = "default_success")]
    success: bool,
}

fn default_category() -> String {
    "unknown".to_string()
}

fn default_success() -> bool {
    true
}

impl ContentRecord {
    /// Record a successful post made now.
    pub fn posted(
        id: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            timestamp: format_timestamp(Utc::now()),
            category: category.into(),
            impressions: 0,
            likes: 0,
            retweets: 0,
            replies: 0,
            success: true,
        }
    }

    /// Creation time, if the stored timestamp parses.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }

    /// Engagement counters as a snapshot.
    pub fn metrics(&self) -> PostMetrics {
        PostMetrics::new(self.impressions, self.likes, self.retweets, self.replies)
    }

    /// Replace the engagement counters.
    pub fn set_metrics(&mut self, metrics: PostMetrics) {
        self.impressions = metrics.impressions;
        self.likes = metrics.likes;
        self.retweets = metrics.retweets;
        self.replies = metrics.replies;
    }

    /// Likes, reposts and replies combined.
    pub fn engagements(&self) -> u64 {
        self.metrics().engagements()
    }
}

/// Format an instant the way records store it (`2024-05-01T09:30:00Z`).
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339 (any offset) and naive ISO-8601 date-times, which are
/// taken to be UTC. Returns `None` for anything else.
///
/// # Examples
///
/// ```
/// use tweetloom_history::parse_timestamp;
///
/// assert!(parse_timestamp("2024-05-01T09:30:00Z").is_some());
/// assert!(parse_timestamp("2024-05-01T09:30:00.123456").is_some());
/// assert!(parse_timestamp("yesterday").is_none());
/// ```
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_missing_fields_take_defaults() {
        let record: ContentRecord = serde_json::from_str(
            r#"{"id": "1", "content": "hi", "timestamp": "2024-01-01T10:00:00"}"#,
        )
        .unwrap();

        assert_eq!(record.category(), "unknown");
        assert!(*record.success());
        assert_eq!(record.metrics(), PostMetrics::default());
    }

    #[test]
    fn test_offset_timestamps_normalise_to_utc() {
        let parsed = parse_timestamp("2024-01-01T12:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_builder_defaults() {
        let record = ContentRecordBuilder::default()
            .id("42")
            .content("hello")
            .build()
            .unwrap();

        assert!(*record.success());
        assert_eq!(record.category(), "unknown");
        assert!(record.created_at().is_some());
    }
}
