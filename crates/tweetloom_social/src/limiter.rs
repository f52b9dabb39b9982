//! Request rate limiting for posting clients.

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// GCRA limiter allowing `requests` calls per `window`.
///
/// The full window may be used as a burst; afterwards calls are spaced
/// `window / requests` apart. Clones share the same budget.
#[derive(Clone)]
pub struct PostLimiter {
    requests: u32,
    window: Duration,
    limiter: Option<Arc<DirectRateLimiter>>,
}

impl PostLimiter {
    /// Create a limiter. Zero requests or a zero window disables limiting.
    pub fn new(requests: u32, window: Duration) -> Self {
        let limiter = NonZeroU32::new(requests).and_then(|burst| {
            Quota::with_period(window / requests.max(1))
                .map(|quota| Arc::new(GovernorRateLimiter::direct(quota.allow_burst(burst))))
        });
        Self {
            requests,
            window,
            limiter,
        }
    }

    /// A limiter that never waits.
    pub fn unlimited() -> Self {
        Self {
            requests: 0,
            window: Duration::ZERO,
            limiter: None,
        }
    }

    /// Wait until one more request fits the budget.
    pub async fn acquire(&self) {
        if let Some(limiter) = &self.limiter {
            if limiter.check().is_err() {
                debug!(requests = self.requests, window_secs = self.window.as_secs(), "Rate limit reached, waiting");
                limiter.until_ready().await;
            }
        }
    }
}

impl std::fmt::Debug for PostLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostLimiter")
            .field("requests", &self.requests)
            .field("window", &self.window)
            .field("enabled", &self.limiter.is_some())
            .finish()
    }
}
