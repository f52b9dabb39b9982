//! Weekly slots and their cron triggers.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tweetloom_error::ConfigError;

/// Weekday names indexed by day number (0 = Monday).
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const CRON_DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// A weekly posting time. Recomputed on every scheduler start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct ScheduledSlot {
    day_of_week: u8,
    hour: u8,
    minute: u8,
}

impl ScheduledSlot {
    /// Create a slot; `day_of_week` is 0 (Monday) to 6 (Sunday).
    pub fn new(day_of_week: u8, hour: u8, minute: u8) -> Self {
        Self {
            day_of_week,
            hour,
            minute,
        }
    }

    /// Weekday name, e.g. `Monday`.
    pub fn day_name(&self) -> &'static str {
        DAY_NAMES
            .get(usize::from(self.day_of_week))
            .copied()
            .unwrap_or("Unknown")
    }

    /// Wall-clock time as `HH:MM`.
    pub fn time(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }

    /// Seven-field cron expression firing weekly at this slot.
    pub fn cron_expression(&self) -> Result<String, ConfigError> {
        let day = CRON_DAYS
            .get(usize::from(self.day_of_week))
            .ok_or_else(|| ConfigError::new(format!("Invalid day of week {}", self.day_of_week)))?;
        Ok(format!("0 {} {} * * {} *", self.minute, self.hour, day))
    }
}

impl std::fmt::Display for ScheduledSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.day_name(), self.time())
    }
}

/// Fires every week at a slot's day and time in a timezone.
#[derive(Debug, Clone)]
pub struct WeeklyTrigger {
    slot: ScheduledSlot,
    tz: Tz,
    schedule: cron::Schedule,
}

impl WeeklyTrigger {
    /// Build the trigger for `slot` in `tz`.
    pub fn new(slot: ScheduledSlot, tz: Tz) -> Result<Self, ConfigError> {
        let expression = slot.cron_expression()?;
        let schedule = cron::Schedule::from_str(&expression).map_err(|e| {
            ConfigError::new(format!("Invalid cron expression '{}': {}", expression, e))
        })?;
        Ok(Self { slot, tz, schedule })
    }

    /// The slot this trigger fires for.
    pub fn slot(&self) -> ScheduledSlot {
        self.slot
    }

    /// Timezone the slot is expressed in.
    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// First firing strictly after `instant`.
    pub fn next_after(&self, instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule
            .after(&instant.with_timezone(&self.tz))
            .next()
            .map(|next| next.with_timezone(&Utc))
    }
}
