//! Post history for tweetloom.
//!
//! The history is a JSON array of [`ContentRecord`]s in a single file, in
//! chronological order and capped at a fixed number of entries (oldest are
//! evicted first). It records what was actually posted, or simulated in a dry
//! run; failed attempts are never written.
//!
//! Reads fail soft: a missing or unreadable file is an empty history. Writes
//! return [`HistoryError`](tweetloom_error::HistoryError) so the caller can
//! log and carry on.
//!
//! # Example
//!
//! ```rust,no_run
//! use tweetloom_history::{ContentRecord, HistoryQuery, HistoryStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = HistoryStore::open("storage/history.json", 100).await;
//! store.append(ContentRecord::posted("1850", "gm #Bitcoin", "crypto")).await?;
//!
//! let crypto = store.query(&HistoryQuery::new().with_category("crypto")).await;
//! let stats = store.statistics().await;
//! println!("{} crypto posts, {:.0}% success", crypto.len(), stats.success_rate() * 100.0);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod export;
mod query;
mod record;
mod stats;
mod store;

pub use export::ExportFormat;
pub use query::HistoryQuery;
pub use record::{
    ContentRecord, ContentRecordBuilder, ContentRecordBuilderError, PostMetrics, format_timestamp,
    parse_timestamp,
};
pub use stats::HistoryStatistics;
pub use store::{DEFAULT_MAX_ENTRIES, HistoryStore};
