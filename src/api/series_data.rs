use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{
    AxisOptions, DataRow, align_column, column_extent, decimate, filter_rows_by_time,
    normalize_timestamps,
};
use crate::error::ChartError;

use super::{ChartConfig, MarkerSizing, SeriesConfig, XSource};

/// One plottable sample after alignment and decimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub x: f64,
    pub y: f64,
    pub size: Option<f64>,
    /// Normalized row time, when the rows carry one.
    pub time: Option<f64>,
    /// Index of the source row in the (filtered) input.
    pub row: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesData {
    pub id: String,
    pub points: Vec<SeriesPoint>,
    /// Plottable samples before decimation.
    pub source_len: usize,
    pub size_extent: (Option<f64>, Option<f64>),
}

impl SeriesData {
    fn empty(id: &str) -> Self {
        Self {
            id: id.to_owned(),
            points: Vec::new(),
            source_len: 0,
            size_extent: (None, None),
        }
    }
}

/// Outcome of the last data load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataStatus {
    Ready { points: usize },
    /// No row produced a plottable point.
    NoData,
    /// A time-indexed series was requested but no row had a usable time.
    NoValidTimestamps,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreparedData {
    pub series: Vec<SeriesData>,
    pub status: DataStatus,
}

/// Runs the reduction pipeline for every series: time filter, timestamp
/// normalization, per-column alignment, then decimation.
///
/// Every series is aligned against the same permutation, so index `i` of
/// two series built from the same rows refers to the same record until
/// decimation drops gaps.
#[must_use]
pub fn prepare_series_data(
    rows: &[DataRow],
    series: &[SeriesConfig],
    config: &ChartConfig,
) -> PreparedData {
    let rows: Cow<'_, [DataRow]> = match config.time_filter {
        Some(range) => Cow::Owned(filter_rows_by_time(rows, &config.time_field, range)),
        None => Cow::Borrowed(rows),
    };

    if rows.is_empty() {
        return PreparedData {
            series: series.iter().map(|s| SeriesData::empty(&s.id)).collect(),
            status: DataStatus::NoData,
        };
    }

    let (permutation, timestamps) =
        match normalize_timestamps(&rows, &config.time_field, config.convert_to_seconds) {
            Ok(sorted) => (sorted.permutation, Some(sorted.sorted_timestamps)),
            Err(ChartError::NoValidTimestamps { .. }) if !series.iter().any(|s| s.uses_time()) => {
                // Purely spatial data keeps input order.
                ((0..rows.len()).collect(), None)
            }
            Err(err) => {
                warn!(error = %err, "no time-indexed series can be built");
                return PreparedData {
                    series: series.iter().map(|s| SeriesData::empty(&s.id)).collect(),
                    status: DataStatus::NoValidTimestamps,
                };
            }
        };

    let prepared: Vec<SeriesData> = series
        .iter()
        .map(|config_entry| {
            build_series(
                &rows,
                &permutation,
                timestamps.as_deref(),
                config_entry,
                config.max_points_per_series,
            )
        })
        .collect();

    let total: usize = prepared.iter().map(|s| s.points.len()).sum();
    debug!(
        rows = rows.len(),
        series = prepared.len(),
        points = total,
        "prepared series data"
    );

    PreparedData {
        series: prepared,
        status: if total == 0 {
            DataStatus::NoData
        } else {
            DataStatus::Ready { points: total }
        },
    }
}

fn build_series(
    rows: &[DataRow],
    permutation: &[usize],
    timestamps: Option<&[f64]>,
    series: &SeriesConfig,
    max_points: usize,
) -> SeriesData {
    let x_values = match &series.x {
        XSource::Time => match timestamps {
            Some(times) => times.iter().copied().map(Some).collect(),
            None => vec![None; permutation.len()],
        },
        XSource::Column(column) => align_column(rows, permutation, column),
    };
    let y_values = align_column(rows, permutation, &series.y_column);
    let size_values = series
        .size_column
        .as_deref()
        .map(|column| align_column(rows, permutation, column));

    let points: Vec<SeriesPoint> = (0..permutation.len())
        .filter_map(|i| {
            Some(SeriesPoint {
                x: x_values[i]?,
                y: y_values[i]?,
                size: size_values.as_ref().and_then(|sizes| sizes[i]),
                time: timestamps.map(|times| times[i]),
                row: permutation[i],
            })
        })
        .collect();

    let source_len = points.len();
    let points = decimate(&points, max_points);
    let sizes: Vec<Option<f64>> = points.iter().map(|point| point.size).collect();

    SeriesData {
        id: series.id.clone(),
        source_len,
        size_extent: column_extent(&sizes),
        points,
    }
}

/// Raw x/y extrema over all series, ignoring values a positive-only axis
/// cannot show.
#[must_use]
pub fn data_extrema(
    series: &[SeriesData],
    x_axis: AxisOptions,
    y_axis: AxisOptions,
) -> ((Option<f64>, Option<f64>), (Option<f64>, Option<f64>)) {
    let keep = |value: f64, options: AxisOptions| !options.requires_positive() || value > 0.0;

    let xs: Vec<Option<f64>> = series
        .iter()
        .flat_map(|s| s.points.iter())
        .map(|point| Some(point.x).filter(|&x| keep(x, x_axis)))
        .collect();
    let ys: Vec<Option<f64>> = series
        .iter()
        .flat_map(|s| s.points.iter())
        .map(|point| Some(point.y).filter(|&y| keep(y, y_axis)))
        .collect();

    (column_extent(&xs), column_extent(&ys))
}

/// Marker radius in logical pixels, scaled linearly within the series size
/// extent for bubble series.
#[must_use]
pub fn marker_radius(
    size: Option<f64>,
    size_extent: (Option<f64>, Option<f64>),
    sizing: MarkerSizing,
) -> f64 {
    let (Some(size), (Some(min), Some(max))) = (size, size_extent) else {
        return sizing.default_radius;
    };
    if max <= min {
        return (sizing.min_radius + sizing.max_radius) / 2.0;
    }

    let normalized = ((size - min) / (max - min)).clamp(0.0, 1.0);
    sizing.min_radius + (sizing.max_radius - sizing.min_radius) * normalized
}
