use serde::{Deserialize, Serialize};

use crate::core::primitives::field_to_epoch_millis;
use crate::core::types::DataRow;

/// Inclusive global time filter in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub min: f64,
    pub max: f64,
}

impl TimeRange {
    /// Builds a range, swapping reversed bounds.
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        if start <= end {
            Self {
                min: start,
                max: end,
            }
        } else {
            Self {
                min: end,
                max: start,
            }
        }
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Returns rows whose time falls inside an inclusive time window.
///
/// Rows without a parseable time are left out.
#[must_use]
pub fn filter_rows_by_time(rows: &[DataRow], time_field: &str, range: TimeRange) -> Vec<DataRow> {
    let range = TimeRange::new(range.min, range.max);
    rows.iter()
        .filter(|row| {
            row.get(time_field)
                .and_then(field_to_epoch_millis)
                .is_some_and(|millis| range.contains(millis))
        })
        .cloned()
        .collect()
}
