use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::primitives::unix_seconds_to_datetime;
use crate::error::{ChartError, ChartResult};
use crate::spatial::HoverPoint;

use super::series_data::{SeriesData, SeriesPoint};
use super::{ChartConfig, SeriesConfig};

/// Text shown for every legend field that has nothing to show.
pub const LEGEND_PLACEHOLDER: &str = "—";

const LEGEND_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Human-readable description of the hovered point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub series: String,
    /// UTC time of the source row.
    pub time: String,
    pub x: String,
    pub y: String,
    /// Bubble size, for series that carry one.
    pub size: Option<String>,
}

impl LegendEntry {
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            series: LEGEND_PLACEHOLDER.to_owned(),
            time: LEGEND_PLACEHOLDER.to_owned(),
            x: LEGEND_PLACEHOLDER.to_owned(),
            y: LEGEND_PLACEHOLDER.to_owned(),
            size: None,
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder()
    }

    /// Single-line form used by the hover label.
    #[must_use]
    pub fn summary(&self) -> String {
        match &self.size {
            Some(size) => format!("{}: x={} y={} size={}", self.series, self.x, self.y, size),
            None => format!("{}: x={} y={}", self.series, self.x, self.y),
        }
    }
}

/// Resolves a hover target back to its series and point.
pub fn lookup_point<'a>(
    series: &'a [SeriesConfig],
    data: &'a [SeriesData],
    series_id: usize,
    data_index: usize,
) -> ChartResult<(&'a SeriesConfig, &'a SeriesPoint)> {
    let config = series.get(series_id).ok_or_else(|| {
        ChartError::NoData(format!("series #{series_id} is not drawn"))
    })?;
    let point = data
        .get(series_id)
        .and_then(|series_data| series_data.points.get(data_index))
        .ok_or_else(|| {
            ChartError::NoData(format!(
                "series `{}` has no point #{data_index}",
                config.id
            ))
        })?;
    Ok((config, point))
}

/// Maps the hovered point to legend labels.
///
/// Never fails: no hover, a stale index or a non-finite value all degrade to
/// [`LEGEND_PLACEHOLDER`].
#[must_use]
pub fn format_legend(
    hover: Option<HoverPoint>,
    series: &[SeriesConfig],
    data: &[SeriesData],
    config: &ChartConfig,
) -> LegendEntry {
    let Some(hover) = hover else {
        return LegendEntry::placeholder();
    };

    let (series_config, point) =
        match lookup_point(series, data, hover.series_id, hover.data_index) {
            Ok(found) => found,
            Err(err) => {
                trace!(error = %err, "legend falls back to placeholder");
                return LegendEntry::placeholder();
            }
        };

    let precision = config.label_precision;
    LegendEntry {
        series: series_config.label.clone(),
        time: point
            .time
            .map(|time| format_time(time, config.convert_to_seconds))
            .unwrap_or_else(|| LEGEND_PLACEHOLDER.to_owned()),
        x: format_number(point.x, precision),
        y: format_number(point.y, precision),
        size: point.size.map(|size| format_number(size, precision)),
    }
}

/// Fixed-precision number with trailing zeros trimmed.
#[must_use]
pub fn format_number(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return LEGEND_PLACEHOLDER.to_owned();
    }
    let text = format!("{value:.precision$}");
    if !text.contains('.') {
        return text;
    }
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

fn format_time(time: f64, in_seconds: bool) -> String {
    let seconds = if in_seconds { time } else { time / 1_000.0 };
    unix_seconds_to_datetime(seconds)
        .map(|datetime| datetime.format(LEGEND_TIME_FORMAT).to_string())
        .unwrap_or_else(|| LEGEND_PLACEHOLDER.to_owned())
}

#[cfg(test)]
mod tests {
    use super::{LEGEND_PLACEHOLDER, LegendEntry, format_legend, format_number};
    use crate::api::series_data::{SeriesData, SeriesPoint};
    use crate::api::{ChartConfig, SeriesConfig};
    use crate::core::Viewport;
    use crate::render::Color;
    use crate::spatial::{HoverPoint, Rect};

    fn fixture() -> (Vec<SeriesConfig>, Vec<SeriesData>) {
        let series = vec![
            SeriesConfig::time_scatter("temp", "temp", Color::rgb(1.0, 0.0, 0.0))
                .with_label("Temperature"),
        ];
        let data = vec![SeriesData {
            id: "temp".to_owned(),
            points: vec![SeriesPoint {
                x: 1_700_000_000.0,
                y: 21.5,
                size: None,
                time: Some(1_700_000_000.0),
                row: 0,
            }],
            source_len: 1,
            size_extent: (None, None),
        }];
        (series, data)
    }

    fn hover(series_id: usize, data_index: usize) -> Option<HoverPoint> {
        Some(HoverPoint {
            series_id,
            data_index,
            bbox: Rect::new(0.0, 0.0, 8.0, 8.0),
        })
    }

    #[test]
    fn formats_hovered_point() {
        let (series, data) = fixture();
        let config = ChartConfig::new(Viewport::new(100, 100), "t");
        let entry = format_legend(hover(0, 0), &series, &data, &config);

        assert_eq!(entry.series, "Temperature");
        assert_eq!(entry.time, "2023-11-14 22:13:20");
        assert_eq!(entry.y, "21.5");
        assert_eq!(entry.size, None);
    }

    #[test]
    fn missing_or_stale_hover_yields_placeholder() {
        let (series, data) = fixture();
        let config = ChartConfig::new(Viewport::new(100, 100), "t");

        assert!(format_legend(None, &series, &data, &config).is_placeholder());
        assert!(format_legend(hover(0, 7), &series, &data, &config).is_placeholder());
        assert!(format_legend(hover(3, 0), &series, &data, &config).is_placeholder());
        assert_eq!(LegendEntry::placeholder().x, LEGEND_PLACEHOLDER);
    }

    #[test]
    fn numbers_trim_trailing_zeros() {
        assert_eq!(format_number(2.5, 4), "2.5");
        assert_eq!(format_number(3.0, 4), "3");
        assert_eq!(format_number(-0.00001, 2), "0");
        assert_eq!(format_number(1.23456, 2), "1.23");
        assert_eq!(format_number(f64::NAN, 2), LEGEND_PLACEHOLDER);
        assert_eq!(format_number(42.0, 0), "42");
    }
}
