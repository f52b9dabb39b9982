//! Record filters.

use crate::record::ContentRecord;
use chrono::{DateTime, Utc};
use derive_getters::Getters;

/// Filter over history records.
///
/// All set conditions must hold. Date bounds are inclusive; records whose
/// timestamp does not parse never match a date bound. `limit` keeps the most
/// recent matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct HistoryQuery {
    category: Option<String>,
    since: Option<DateTime<Utc>>,
    until: Option<DateTime<Utc>>,
    limit: Option<usize>,
}

impl HistoryQuery {
    /// Query matching every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only records in `category`.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Only records created at or after `since`.
    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    /// Only records created at or before `until`.
    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    /// Keep at most the `limit` most recent matches.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether `record` satisfies the filter (ignores `limit`).
    pub fn matches(&self, record: &ContentRecord) -> bool {
        if self
            .category
            .as_ref()
            .is_some_and(|category| record.category() != category)
        {
            return false;
        }
        if self.since.is_none() && self.until.is_none() {
            return true;
        }
        let Some(created) = record.created_at() else {
            return false;
        };
        self.since.is_none_or(|since| created >= since)
            && self.until.is_none_or(|until| created <= until)
    }

    /// Apply the filter and limit, preserving chronological order.
    pub fn apply(&self, records: Vec<ContentRecord>) -> Vec<ContentRecord> {
        let mut matched: Vec<ContentRecord> =
            records.into_iter().filter(|r| self.matches(r)).collect();
        if let Some(limit) = self.limit {
            let excess = matched.len().saturating_sub(limit);
            matched.drain(..excess);
        }
        matched
    }
}
