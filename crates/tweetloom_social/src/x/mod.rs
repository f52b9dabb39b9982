//! X (Twitter) API v2 client.

mod client;
mod models;

pub use client::{API_BASE_ENV, BEARER_TOKEN_ENV, DEFAULT_API_BASE, XClient};
pub use models::{XPublicMetrics, XTweet, XUser};
