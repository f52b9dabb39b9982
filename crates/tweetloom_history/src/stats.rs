//! Aggregate statistics over the history.

use crate::record::ContentRecord;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Totals and rates computed from the full history.
///
/// Rates are zero when their denominator is zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
pub struct HistoryStatistics {
    total_count: usize,
    success_count: usize,
    failure_count: usize,
    success_rate: f64,
    total_impressions: u64,
    total_engagements: u64,
    engagement_rate: f64,
    category_counts: BTreeMap<String, usize>,
}

impl HistoryStatistics {
    /// Aggregate `records`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tweetloom_history::HistoryStatistics;
    ///
    /// let stats = HistoryStatistics::from_records(&[]);
    /// assert_eq!(*stats.total_count(), 0);
    /// assert_eq!(*stats.success_rate(), 0.0);
    /// ```
    pub fn from_records(records: &[ContentRecord]) -> Self {
        let total_count = records.len();
        let success_count = records.iter().filter(|r| *r.success()).count();
        let total_impressions: u64 = records.iter().map(|r| *r.impressions()).sum();
        let total_engagements: u64 = records.iter().map(ContentRecord::engagements).sum();

        let mut category_counts = BTreeMap::new();
        for record in records {
            *category_counts.entry(record.category().clone()).or_insert(0) += 1;
        }

        Self {
            total_count,
            success_count,
            failure_count: total_count - success_count,
            success_rate: ratio(success_count as f64, total_count as f64),
            total_impressions,
            total_engagements,
            engagement_rate: ratio(total_engagements as f64, total_impressions as f64),
            category_counts,
        }
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
