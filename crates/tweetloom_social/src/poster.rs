//! Posting collaborator trait and result types.

use async_trait::async_trait;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tweetloom_error::PostError;
use tweetloom_history::PostMetrics;

/// Result type for posting operations.
pub type PostResult<T> = Result<T, PostError>;

/// Confirmation of a published post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PostReceipt {
    /// Platform identifier of the new post
    id: String,
    /// Text as published
    text: String,
}

impl PostReceipt {
    /// Create a receipt.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// The account a poster publishes as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Identity {
    /// Platform user id
    id: String,
    /// Display name
    name: String,
    /// Handle without the leading `@`
    handle: String,
}

impl Identity {
    /// Create an identity.
    pub fn new(id: impl Into<String>, name: impl Into<String>, handle: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            handle: handle.into(),
        }
    }
}

/// A social platform that can publish text.
///
/// Failures are [`PostError`]s; callers treat them as contained to the one
/// attempt and keep running.
#[async_trait]
pub trait Poster: Send + Sync {
    /// Publish `text`.
    async fn post(&self, text: &str) -> PostResult<PostReceipt>;

    /// The authenticated account, if the platform reports one.
    async fn identity(&self) -> PostResult<Option<Identity>>;

    /// Public engagement counters for a post, if it still exists.
    async fn metrics(&self, post_id: &str) -> PostResult<Option<PostMetrics>>;

    /// Platform name for logs.
    fn name(&self) -> &str;
}

/// Stand-in for a platform whose credentials are missing.
///
/// Lets commands that never publish (dry runs, history maintenance) share the
/// same wiring as live ones. Every call fails with
/// [`PostErrorKind::MissingCredentials`](tweetloom_error::PostErrorKind::MissingCredentials).
#[derive(Debug, Clone)]
pub struct UnconfiguredPoster {
    reason: String,
}

impl UnconfiguredPoster {
    /// Create a poster that fails with `reason`.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn missing(&self) -> PostError {
        PostError::new(tweetloom_error::PostErrorKind::MissingCredentials(
            self.reason.clone(),
        ))
    }
}

#[async_trait]
impl Poster for UnconfiguredPoster {
    async fn post(&self, _text: &str) -> PostResult<PostReceipt> {
        Err(self.missing())
    }

    async fn identity(&self) -> PostResult<Option<Identity>> {
        Err(self.missing())
    }

    async fn metrics(&self, _post_id: &str) -> PostResult<Option<PostMetrics>> {
        Err(self.missing())
    }

    fn name(&self) -> &str {
        "unconfigured"
    }
}
