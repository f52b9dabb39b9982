//! Scheduling for tweetloom.
//!
//! A [`TweetScheduler`] draws a handful of random weekly slots from a
//! [`ScheduleConfig`], turns each into a [`WeeklyTrigger`] in the configured
//! timezone and runs one task per slot. Every firing runs the
//! [`PostPipeline`]: generate, post (or simulate in a dry run), record.
//!
//! ```text
//! Idle --schedule_slots--> Scheduled --start--> Running --stop--> Stopped
//!   \_____________________start (draws slots)____/        \__start__/
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod pipeline;
mod scheduler;
mod slot;

pub use config::{ScheduleConfig, TimeRange};
pub use pipeline::{DRY_RUN_ID_PREFIX, FireOutcome, PostPipeline};
pub use scheduler::{SchedulerState, SlotListing, TweetScheduler};
pub use slot::{DAY_NAMES, ScheduledSlot, WeeklyTrigger};
