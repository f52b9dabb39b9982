//! Posting collaborators for tweetloom.
//!
//! The [`Poster`] trait is the seam between the scheduler and a social
//! platform. [`XClient`] implements it for the X (Twitter) API v2 with a
//! bearer token, gated by a GCRA rate limiter.
//!
//! Construct one client at startup and share it as `Arc<dyn Poster>`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod limiter;
mod poster;
mod x;

pub use limiter::PostLimiter;
pub use poster::{Identity, PostReceipt, PostResult, Poster, UnconfiguredPoster};
pub use x::{
    API_BASE_ENV, BEARER_TOKEN_ENV, DEFAULT_API_BASE, XClient, XPublicMetrics, XTweet, XUser,
};
