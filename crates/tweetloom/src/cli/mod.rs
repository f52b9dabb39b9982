//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the tweetloom binary.

mod commands;
mod history;
mod inspect;
mod post;

pub use commands::{Cli, Commands};
pub use history::{cleanup, export, refresh_metrics, stats};
pub use inspect::{schedule, validate, whoami};
pub use post::{once, post, run};
