//! Test utilities for scheduler tests.
//!
//! Mock posting collaborators and a pipeline wired to a temporary history.

#![allow(dead_code)]

use async_trait::async_trait;
use rand::RngCore;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::Notify;
use tweetloom_content::{CategoryWeights, ContentSelector, Generator, GeneratorRegistry};
use tweetloom_error::{PostError, PostErrorKind};
use tweetloom_history::{HistoryStore, PostMetrics};
use tweetloom_scheduler::PostPipeline;
use tweetloom_social::{Identity, PostReceipt, PostResult, Poster};

/// How the mock poster responds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Every post succeeds
    Succeed,
    /// Every post fails with a transport error
    Fail,
    /// Posts succeed after a delay, signalling when they start
    Slow(Duration),
}

/// Poster that counts calls instead of talking to a platform.
#[derive(Debug)]
pub struct MockPoster {
    behavior: MockBehavior,
    calls: AtomicUsize,
    completed: AtomicUsize,
    started: Notify,
}

impl MockPoster {
    pub fn new(behavior: MockBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            started: Notify::new(),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Resolves once a post has started.
    pub async fn started(&self) {
        self.started.notified().await;
    }
}

#[async_trait]
impl Poster for MockPoster {
    async fn post(&self, text: &str) -> PostResult<PostReceipt> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.started.notify_one();

        match self.behavior {
            MockBehavior::Succeed => {}
            MockBehavior::Fail => {
                return Err(PostError::new(PostErrorKind::Http(
                    "connection reset".to_string(),
                )));
            }
            MockBehavior::Slow(delay) => tokio::time::sleep(delay).await,
        }

        self.completed.fetch_add(1, Ordering::SeqCst);
        Ok(PostReceipt::new(format!("post-{call}"), text))
    }

    async fn identity(&self) -> PostResult<Option<Identity>> {
        Ok(Some(Identity::new("1", "Mock Bot", "mockbot")))
    }

    async fn metrics(&self, _post_id: &str) -> PostResult<Option<PostMetrics>> {
        Ok(Some(PostMetrics::default()))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[derive(Debug)]
struct FixedGenerator;

impl Generator for FixedGenerator {
    fn category(&self) -> &str {
        "crypto"
    }

    fn generate(&self, _rng: &mut dyn RngCore) -> String {
        "Self-custody is a habit, not a product. #Bitcoin".to_string()
    }
}

/// Selector that always produces the same crypto tweet.
pub fn fixed_selector() -> Arc<ContentSelector> {
    let mut registry = GeneratorRegistry::new();
    registry.register("crypto", Arc::new(FixedGenerator));
    let weights = CategoryWeights::new([("crypto", 1.0)]).expect("valid weights");
    Arc::new(ContentSelector::new(weights, registry, "crypto", 280).expect("valid selector"))
}

/// Pipeline with a history file inside `dir`.
pub async fn pipeline(dir: &TempDir, poster: Arc<MockPoster>, dry_run: bool) -> Arc<PostPipeline> {
    let history = HistoryStore::open(dir.path().join("history.json"), 100).await;
    Arc::new(PostPipeline::new(fixed_selector(), poster, history, dry_run))
}
