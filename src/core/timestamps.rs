use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::primitives::field_to_epoch_millis;
use crate::core::types::DataRow;
use crate::error::{ChartError, ChartResult};

/// Time values sorted ascending together with the row indices they came from.
///
/// `permutation[i]` is the index (into the original row slice) of the row that
/// contributed `sorted_timestamps[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortedTimeSeries {
    pub sorted_timestamps: Vec<f64>,
    pub permutation: Vec<usize>,
}

impl SortedTimeSeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.permutation.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.permutation.is_empty()
    }

    /// Inclusive span covered by the sorted values.
    #[must_use]
    pub fn span(&self) -> Option<(f64, f64)> {
        Some((
            *self.sorted_timestamps.first()?,
            *self.sorted_timestamps.last()?,
        ))
    }
}

/// Parses `time_field` of every row, drops rows without a usable time, and
/// stable-sorts the rest ascending.
///
/// Values are epoch milliseconds, or epoch seconds when `convert_to_seconds`.
/// Returns [`ChartError::NoValidTimestamps`] when no row survives.
pub fn normalize_timestamps(
    rows: &[DataRow],
    time_field: &str,
    convert_to_seconds: bool,
) -> ChartResult<SortedTimeSeries> {
    let mut parsed: Vec<(f64, usize)> = Vec::with_capacity(rows.len());
    let mut dropped = 0usize;

    for (index, row) in rows.iter().enumerate() {
        match row.get(time_field).and_then(field_to_epoch_millis) {
            Some(millis) => {
                let value = if convert_to_seconds {
                    millis / 1000.0
                } else {
                    millis
                };
                parsed.push((value, index));
            }
            None => {
                dropped += 1;
                warn!(row = index, field = time_field, "dropping row with unparseable time");
            }
        }
    }

    if parsed.is_empty() {
        return Err(ChartError::NoValidTimestamps {
            field: time_field.to_owned(),
            rows: rows.len(),
        });
    }

    // `sort_by` is stable, so equal timestamps keep their row order.
    parsed.sort_by(|lhs, rhs| lhs.0.total_cmp(&rhs.0));

    debug!(
        rows = rows.len(),
        kept = parsed.len(),
        dropped,
        "normalized timestamps"
    );

    let (sorted_timestamps, permutation) = parsed.into_iter().unzip();
    Ok(SortedTimeSeries {
        sorted_timestamps,
        permutation,
    })
}
