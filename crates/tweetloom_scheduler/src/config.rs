//! Static schedule configuration.

use crate::slot::ScheduledSlot;
use chrono_tz::Tz;
use derive_getters::Getters;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::info;
use tweetloom_error::ConfigError;

const MAX_POSTS_PER_WEEK: u32 = 50;

/// Hours of the day (in the schedule timezone) when posts may go out.
///
/// Slots use hours `start_hour..end_hour`, so `end_hour` itself is excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TimeRange {
    #[serde(default = "default_start_hour")]
    start_hour: u8,
    #[serde(default = "default_end_hour")]
    end_hour: u8,
}

fn default_start_hour() -> u8 {
    9
}

fn default_end_hour() -> u8 {
    21
}

impl TimeRange {
    /// Create a range of hours.
    pub fn new(start_hour: u8, end_hour: u8) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::new(default_start_hour(), default_end_hour())
    }
}

/// How many posts go out each week, on which days and at which hours.
///
/// Days are numbered 0 (Monday) to 6 (Sunday).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ScheduleConfig {
    /// Posts per week
    #[serde(default = "default_count")]
    count: u32,

    /// Allowed weekdays
    #[serde(default = "default_days")]
    days: Vec<u8>,

    /// Allowed hours
    #[serde(default)]
    time_range: TimeRange,

    /// IANA timezone name the slots are expressed in
    #[serde(default = "default_timezone")]
    timezone: String,
}

fn default_count() -> u32 {
    2
}

fn default_days() -> Vec<u8> {
    (0..7).collect()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            days: default_days(),
            time_range: TimeRange::default(),
            timezone: default_timezone(),
        }
    }
}

impl ScheduleConfig {
    /// Create a schedule configuration.
    pub fn new(count: u32, days: Vec<u8>, time_range: TimeRange, timezone: impl Into<String>) -> Self {
        Self {
            count,
            days,
            time_range,
            timezone: timezone.into(),
        }
    }

    /// Check bounds and resolve the timezone.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `count` is outside `1..=50`, `days` is
    /// empty or has a value above 6, the hour range is empty or ends after 24,
    /// or the timezone is not a known IANA name.
    pub fn validate(&self) -> Result<Tz, ConfigError> {
        if !(1..=MAX_POSTS_PER_WEEK).contains(&self.count) {
            return Err(ConfigError::new(format!(
                "schedule.count must be between 1 and {}, got {}",
                MAX_POSTS_PER_WEEK, self.count
            )));
        }
        if self.days.is_empty() {
            return Err(ConfigError::new("schedule.days must list at least one day"));
        }
        if let Some(day) = self.days.iter().find(|d| **d > 6) {
            return Err(ConfigError::new(format!(
                "schedule.days values must be 0 (Monday) to 6 (Sunday), got {}",
                day
            )));
        }
        let TimeRange {
            start_hour,
            end_hour,
        } = self.time_range;
        if start_hour >= end_hour || end_hour > 24 {
            return Err(ConfigError::new(format!(
                "schedule.time_range must satisfy start_hour < end_hour <= 24, got {}..{}",
                start_hour, end_hour
            )));
        }
        self.tz()
    }

    /// Parsed timezone.
    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.timezone.parse::<Tz>().map_err(|_| {
            ConfigError::new(format!(
                "schedule.timezone '{}' is not a known IANA timezone",
                self.timezone
            ))
        })
    }

    /// Draw `count` independent random slots.
    ///
    /// Each slot picks a uniformly random allowed day, an hour in
    /// `start_hour..end_hour` and a minute in `0..60`. Duplicates are kept.
    pub fn draw_slots(&self, rng: &mut dyn RngCore) -> Vec<ScheduledSlot> {
        let TimeRange {
            start_hour,
            end_hour,
        } = self.time_range;
        let slots: Vec<ScheduledSlot> = (0..self.count)
            .filter_map(|_| {
                let day = *self.days.choose(rng)?;
                let hour = if start_hour < end_hour {
                    rng.gen_range(start_hour..end_hour)
                } else {
                    start_hour
                };
                let minute = rng.gen_range(0..60);
                Some(ScheduledSlot::new(day, hour, minute))
            })
            .collect();
        info!(count = slots.len(), "Generated random schedule");
        slots
    }
}
