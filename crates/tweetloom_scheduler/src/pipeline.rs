//! The fire action: generate, post, record.

use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use tweetloom_content::{ContentSelector, GeneratedTweet};
use tweetloom_error::PostError;
use tweetloom_history::{ContentRecord, HistoryStore};
use tweetloom_social::Poster;
use uuid::Uuid;

/// Prefix of the placeholder ids recorded for dry-run posts.
pub const DRY_RUN_ID_PREFIX: &str = "dry-run-";

/// Result of one firing.
#[derive(Debug, Clone)]
pub enum FireOutcome {
    /// Published and recorded
    Posted {
        /// Platform post id
        id: String,
        /// Category of the generated text
        category: String,
        /// Published text
        text: String,
    },
    /// Dry run: logged and recorded under a placeholder id, nothing published
    Simulated {
        /// Placeholder id (`dry-run-<uuid>`)
        id: String,
        /// Category of the generated text
        category: String,
        /// Text that would have been published
        text: String,
    },
    /// Posting failed; nothing recorded
    Failed {
        /// Category of the generated text
        category: String,
        /// Text that was not published
        text: String,
        /// Why the post failed
        error: PostError,
    },
}

impl FireOutcome {
    /// Whether the post went out (or was simulated).
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }

    /// Post id for successful outcomes.
    pub fn post_id(&self) -> Option<&str> {
        match self {
            Self::Posted { id, .. } | Self::Simulated { id, .. } => Some(id),
            Self::Failed { .. } => None,
        }
    }

    /// Text that was (or would have been) posted.
    pub fn text(&self) -> &str {
        match self {
            Self::Posted { text, .. } | Self::Simulated { text, .. } | Self::Failed { text, .. } => {
                text
            }
        }
    }
}

/// Generates a tweet, posts it (or simulates it) and records successes.
///
/// History is a record of what was posted: failed attempts are logged and
/// never written.
#[derive(Clone)]
pub struct PostPipeline {
    selector: Arc<ContentSelector>,
    poster: Arc<dyn Poster>,
    history: HistoryStore,
    dry_run: bool,
}

impl std::fmt::Debug for PostPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostPipeline")
            .field("poster", &self.poster.name())
            .field("history", &self.history.path())
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl PostPipeline {
    /// Create a pipeline.
    pub fn new(
        selector: Arc<ContentSelector>,
        poster: Arc<dyn Poster>,
        history: HistoryStore,
        dry_run: bool,
    ) -> Self {
        Self {
            selector,
            poster,
            history,
            dry_run,
        }
    }

    /// Whether posts are simulated.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Content selector in use.
    pub fn selector(&self) -> &ContentSelector {
        &self.selector
    }

    /// History store records are written to.
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Posting collaborator.
    pub fn poster(&self) -> &Arc<dyn Poster> {
        &self.poster
    }

    /// Generate one tweet with a fresh thread-local RNG.
    pub fn generate(&self) -> GeneratedTweet {
        let mut rng = rand::thread_rng();
        self.selector.generate_tweet(&mut rng)
    }

    /// Run one scheduled firing.
    #[instrument(skip(self), fields(dry_run = self.dry_run))]
    pub async fn fire(&self) -> FireOutcome {
        info!("Executing scheduled tweet");
        let tweet = self.generate();
        self.publish(tweet).await
    }

    /// Post (or simulate) already generated text and record it on success.
    ///
    /// The text is trimmed to the selector's length budget first.
    #[instrument(skip(self, tweet), fields(category = %tweet.category()))]
    pub async fn publish(&self, tweet: GeneratedTweet) -> FireOutcome {
        let (category, text) = tweet.into_parts();
        let text = self.selector.trim(&text);

        if self.dry_run {
            let id = format!("{}{}", DRY_RUN_ID_PREFIX, Uuid::new_v4());
            info!(post_id = %id, text = %text, "Dry run: would have posted");
            self.record(&id, &text, &category).await;
            return FireOutcome::Simulated { id, category, text };
        }

        match self.poster.post(&text).await {
            Ok(receipt) => {
                info!(post_id = %receipt.id(), platform = self.poster.name(), "Tweet posted");
                self.record(receipt.id(), &text, &category).await;
                FireOutcome::Posted {
                    id: receipt.id().clone(),
                    category,
                    text,
                }
            }
            Err(error) => {
                error!(
                    error = %error,
                    recoverable = error.is_recoverable(),
                    "Failed to post tweet"
                );
                FireOutcome::Failed {
                    category,
                    text,
                    error,
                }
            }
        }
    }

    async fn record(&self, id: &str, text: &str, category: &str) {
        let record = ContentRecord::posted(id, text, category);
        if let Err(e) = self.history.append(record).await {
            warn!(error = %e, post_id = id, "Failed to record tweet in history");
        }
    }
}
