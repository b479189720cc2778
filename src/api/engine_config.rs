use serde::{Deserialize, Serialize};

use crate::core::{AxisOptions, TimeRange, Viewport, ZoomFactors};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;
use crate::spatial::DEFAULT_NODE_CAPACITY;

/// Default per-series point budget applied by decimation.
pub const DEFAULT_MAX_POINTS_PER_SERIES: usize = 20_000;

/// Marker radii in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerSizing {
    /// Radius of scatter markers and of bubbles without a size value.
    pub default_radius: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    /// Extra radius of the hover highlight ring.
    pub highlight_padding: f64,
}

impl Default for MarkerSizing {
    fn default() -> Self {
        Self {
            default_radius: 4.0,
            min_radius: 3.0,
            max_radius: 18.0,
            highlight_padding: 2.0,
        }
    }
}

impl MarkerSizing {
    fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("default_radius", self.default_radius),
            ("min_radius", self.min_radius),
            ("max_radius", self.max_radius),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "marker {name} must be finite and > 0"
                )));
            }
        }
        if self.min_radius > self.max_radius {
            return Err(ChartError::InvalidData(
                "marker min_radius must be <= max_radius".to_owned(),
            ));
        }
        if !self.highlight_padding.is_finite() || self.highlight_padding < 0.0 {
            return Err(ChartError::InvalidData(
                "marker highlight_padding must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Public chart bootstrap configuration.
///
/// Serializable so hosts can persist chart setup next to their own settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub viewport: Viewport,
    /// Row field holding the time of each record.
    pub time_field: String,
    /// Time-indexed x values are epoch seconds when set, milliseconds otherwise.
    #[serde(default = "default_true")]
    pub convert_to_seconds: bool,
    #[serde(default)]
    pub time_filter: Option<TimeRange>,
    #[serde(default = "default_max_points_per_series")]
    pub max_points_per_series: usize,
    #[serde(default)]
    pub zoom_factors: ZoomFactors,
    #[serde(default)]
    pub x_axis: AxisOptions,
    #[serde(default)]
    pub y_axis: AxisOptions,
    #[serde(default)]
    pub marker_sizing: MarkerSizing,
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default = "default_highlight_color")]
    pub highlight_color: Color,
    #[serde(default = "default_true")]
    pub show_hover_label: bool,
    /// Decimal places used by legend and hover labels.
    #[serde(default = "default_label_precision")]
    pub label_precision: usize,
    #[serde(default = "default_index_capacity")]
    pub index_node_capacity: usize,
}

impl ChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport, time_field: impl Into<String>) -> Self {
        Self {
            viewport,
            time_field: time_field.into(),
            convert_to_seconds: true,
            time_filter: None,
            max_points_per_series: DEFAULT_MAX_POINTS_PER_SERIES,
            zoom_factors: ZoomFactors::default(),
            x_axis: AxisOptions::default(),
            y_axis: AxisOptions::default(),
            marker_sizing: MarkerSizing::default(),
            background: default_background(),
            highlight_color: default_highlight_color(),
            show_hover_label: true,
            label_precision: default_label_precision(),
            index_node_capacity: DEFAULT_NODE_CAPACITY,
        }
    }

    #[must_use]
    pub fn with_time_filter(mut self, time_filter: Option<TimeRange>) -> Self {
        self.time_filter = time_filter;
        self
    }

    #[must_use]
    pub fn with_max_points_per_series(mut self, max_points: usize) -> Self {
        self.max_points_per_series = max_points;
        self
    }

    #[must_use]
    pub fn with_zoom_factors(mut self, zoom_factors: ZoomFactors) -> Self {
        self.zoom_factors = zoom_factors;
        self
    }

    #[must_use]
    pub fn with_axes(mut self, x_axis: AxisOptions, y_axis: AxisOptions) -> Self {
        self.x_axis = x_axis;
        self.y_axis = y_axis;
        self
    }

    #[must_use]
    pub fn with_marker_sizing(mut self, marker_sizing: MarkerSizing) -> Self {
        self.marker_sizing = marker_sizing;
        self
    }

    #[must_use]
    pub fn with_convert_to_seconds(mut self, convert_to_seconds: bool) -> Self {
        self.convert_to_seconds = convert_to_seconds;
        self
    }

    #[must_use]
    pub fn with_hover_label(mut self, show_hover_label: bool) -> Self {
        self.show_hover_label = show_hover_label;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if self.time_field.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "time field name must not be empty".to_owned(),
            ));
        }
        if self.max_points_per_series == 0 {
            return Err(ChartError::InvalidData(
                "max points per series must be > 0".to_owned(),
            ));
        }
        if self.index_node_capacity == 0 {
            return Err(ChartError::InvalidData(
                "index node capacity must be > 0".to_owned(),
            ));
        }
        if let Some(filter) = self.time_filter {
            if !filter.min.is_finite() || !filter.max.is_finite() {
                return Err(ChartError::InvalidData(
                    "time filter bounds must be finite".to_owned(),
                ));
            }
        }
        for factor in [self.zoom_factors.x, self.zoom_factors.y] {
            if !factor.is_finite() || factor <= 0.0 || factor > 1.0 {
                return Err(ChartError::InvalidData(
                    "zoom factors must be finite and in (0, 1]".to_owned(),
                ));
            }
        }
        self.marker_sizing.validate()?;
        self.background.validate()?;
        self.highlight_color.validate()
    }
}

fn default_true() -> bool {
    true
}

fn default_max_points_per_series() -> usize {
    DEFAULT_MAX_POINTS_PER_SERIES
}

fn default_background() -> Color {
    Color::rgb(1.0, 1.0, 1.0)
}

fn default_highlight_color() -> Color {
    Color::rgb(0.95, 0.45, 0.05)
}

fn default_label_precision() -> usize {
    4
}

fn default_index_capacity() -> usize {
    DEFAULT_NODE_CAPACITY
}
