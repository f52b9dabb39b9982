//! Wire models for the X API v2.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tweetloom_history::PostMetrics;

/// `POST /2/tweets` request body.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateTweetRequest<'a> {
    pub(crate) text: &'a str,
}

/// Envelope used by every v2 endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Envelope<T> {
    pub(crate) data: Option<T>,
}

/// A post as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct XTweet {
    /// Post id
    id: String,
    /// Post text
    #[serde(default)]
    text: String,
    /// Counters, present when `tweet.fields=public_metrics` is requested
    #[serde(default)]
    public_metrics: Option<XPublicMetrics>,
}

/// Public counters attached to a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct XPublicMetrics {
    /// Reposts
    #[serde(default)]
    retweet_count: u64,
    /// Replies
    #[serde(default)]
    reply_count: u64,
    /// Likes
    #[serde(default)]
    like_count: u64,
    /// Quote posts
    #[serde(default)]
    quote_count: u64,
    /// Impressions
    #[serde(default)]
    impression_count: u64,
}

impl From<XPublicMetrics> for PostMetrics {
    fn from(metrics: XPublicMetrics) -> Self {
        PostMetrics::new(
            metrics.impression_count,
            metrics.like_count,
            metrics.retweet_count,
            metrics.reply_count,
        )
    }
}

/// The authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct XUser {
    /// User id
    id: String,
    /// Display name
    name: String,
    /// Handle
    username: String,
}
