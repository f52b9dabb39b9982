//! Tweetloom - a scheduled tweet bot.
//!
//! Tweetloom draws a few random weekly time slots, and at each one generates a
//! tweet from static content pools (crypto, humor, finance, social), posts it
//! through a posting collaborator and records it in a bounded JSON history.
//!
//! # Features
//!
//! - **Weighted content**: category picked by configurable relative weights,
//!   with a default generator as fallback
//! - **Random weekly schedule**: slots drawn per start, evaluated in an IANA
//!   timezone
//! - **Dry runs**: every effect logged and recorded under a placeholder id,
//!   nothing published
//! - **History**: statistics, queries, retention cleanup, JSON/CSV export and
//!   engagement metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tweetloom::{Tweetloom, TweetloomConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TweetloomConfig::load(None)?.with_dry_run(true);
//!     let bot = Tweetloom::build(config).await?;
//!
//!     let outcome = bot.pipeline().fire().await;
//!     println!("{}", outcome.text());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `tweetloom_error` - Error types
//! - `tweetloom_content` - Data pools, generators, selection, trimming, validation
//! - `tweetloom_history` - History log, queries, statistics, export
//! - `tweetloom_social` - Posting collaborator trait and X client
//! - `tweetloom_scheduler` - Weekly slots, triggers and the fire pipeline
//!
//! This crate (`tweetloom`) re-exports everything for convenience and adds
//! configuration loading, logging setup and the startup wiring.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
mod config;
mod observability;

pub use app::{MetricsRefresh, SampleCheck, Tweetloom, connect_poster};
pub use config::{ContentConfig, DEFAULT_CONFIG, HistoryConfig, PlatformConfig, TweetloomConfig};
pub use observability::{ObservabilityConfig, init_observability};

pub use tweetloom_content::*;
pub use tweetloom_error::*;
pub use tweetloom_history::*;
pub use tweetloom_scheduler::*;
pub use tweetloom_social::*;
