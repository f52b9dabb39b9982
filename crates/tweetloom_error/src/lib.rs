//! Error types for tweetloom.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! Each error belongs to one failure class of the bot:
//!
//! | error            | raised by                  | policy                               |
//! |------------------|----------------------------|--------------------------------------|
//! | `DataLoadError`  | generator construction     | fatal at startup                     |
//! | `ConfigError`    | configuration validation   | fatal at startup                     |
//! | `PostError`      | posting API collaborator   | logged, firing counted as failed     |
//! | `HistoryError`   | history file writes        | logged and swallowed                 |
//! | `ExportError`    | history export             | reported to the caller, never panics |
//! | `ValidationError`| hand-written post text     | reported to the caller, nothing sent |
//!
//! # Examples
//!
//! ```
//! use tweetloom_error::{ConfigError, TweetloomResult};
//!
//! fn load() -> TweetloomResult<()> {
//!     Err(ConfigError::new("schedule.count must be between 1 and 50"))?
//! }
//!
//! assert!(load().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod data;
mod error;
mod export;
mod history;
mod post;
mod validation;

pub use config::ConfigError;
pub use data::{DataLoadError, DataLoadErrorKind};
pub use error::{TweetloomError, TweetloomErrorKind, TweetloomResult};
pub use export::{ExportError, ExportErrorKind};
pub use history::{HistoryError, HistoryErrorKind};
pub use post::{PostError, PostErrorKind};
pub use validation::ValidationError;
