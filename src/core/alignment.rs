use crate::core::types::DataRow;

/// Column values reordered to follow a [`SortedTimeSeries`](crate::core::SortedTimeSeries)
/// permutation. `None` marks a missing or non-numeric value.
pub type AlignedColumn = Vec<Option<f64>>;

/// Emits `rows[permutation[i]][column]` for every `i`, or `None` when the value
/// is absent or not a finite number.
///
/// Columns aligned against the same permutation share length and ordering.
#[must_use]
pub fn align_column(rows: &[DataRow], permutation: &[usize], column: &str) -> AlignedColumn {
    permutation
        .iter()
        .map(|&row_index| rows.get(row_index).and_then(|row| row.number(column)))
        .collect()
}

/// Finite extrema of an aligned column, `(None, None)` when it holds no value.
#[must_use]
pub fn column_extent(values: &[Option<f64>]) -> (Option<f64>, Option<f64>) {
    values
        .iter()
        .flatten()
        .filter(|value| value.is_finite())
        .fold((None, None), |(min, max), &value| {
            (
                Some(min.map_or(value, |current: f64| current.min(value))),
                Some(max.map_or(value, |current: f64| current.max(value))),
            )
        })
}
