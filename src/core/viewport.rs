use serde::{Deserialize, Serialize};

use crate::core::range::{guarded_log_range, guarded_range};
use crate::core::scale::AxisScaleMode;
use crate::core::types::Viewport;
use crate::error::{ChartError, ChartResult};

/// Overscroll allowed past the data extent, as a fraction of the extent span.
pub const OVERSCROLL_TOLERANCE_RATIO: f64 = 0.01;
/// Positive-only axes never show a minimum at or below this value.
pub const POSITIVE_EPSILON: f64 = 1e-9;
/// Lowest minimum a positive-only axis may reach; strictly above [`POSITIVE_EPSILON`].
pub const POSITIVE_AXIS_FLOOR: f64 = 2.0 * POSITIVE_EPSILON;
/// Default per-step wheel zoom factor.
pub const DEFAULT_ZOOM_FACTOR: f64 = 0.9;
/// Smallest window span, relative to the magnitude of its bounds, that
/// zooming in may reach. On log axes it is also an absolute floor in decades.
pub const MIN_RELATIVE_SPAN: f64 = 1e-9;

/// Visible data window on one axis. Invariant: `min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

impl AxisBounds {
    pub fn new(min: f64, max: f64) -> ChartResult<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ChartError::InvalidData(format!(
                "axis bounds must be finite with min < max (got {min}..{max})"
            )));
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn shifted(self, delta: f64) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Per-axis behavior flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisOptions {
    /// The axis carries strictly positive quantities (sizes, rates, counts).
    pub positive_only: bool,
    pub scale_mode: AxisScaleMode,
}

impl AxisOptions {
    #[must_use]
    pub fn positive() -> Self {
        Self {
            positive_only: true,
            scale_mode: AxisScaleMode::Linear,
        }
    }

    #[must_use]
    pub fn log() -> Self {
        Self {
            positive_only: true,
            scale_mode: AxisScaleMode::Log,
        }
    }

    /// Log axes are implicitly positive-only.
    #[must_use]
    pub fn requires_positive(self) -> bool {
        self.positive_only || self.scale_mode == AxisScaleMode::Log
    }

    /// Maps a data value into the space pan and zoom are linear in: data
    /// units, or decades on a log axis.
    #[must_use]
    pub fn to_axis_space(self, value: f64) -> f64 {
        match self.scale_mode {
            AxisScaleMode::Linear => value,
            AxisScaleMode::Log => value.log10(),
        }
    }

    #[must_use]
    pub fn from_axis_space(self, value: f64) -> f64 {
        match self.scale_mode {
            AxisScaleMode::Linear => value,
            AxisScaleMode::Log => 10f64.powf(value),
        }
    }

    fn bounds_to_axis_space(self, bounds: AxisBounds) -> AxisBounds {
        AxisBounds {
            min: self.to_axis_space(bounds.min),
            max: self.to_axis_space(bounds.max),
        }
    }

    fn bounds_from_axis_space(self, bounds: AxisBounds) -> AxisBounds {
        AxisBounds {
            min: self.from_axis_space(bounds.min),
            max: self.from_axis_space(bounds.max),
        }
    }

    fn guarded_extent(self, min: Option<f64>, max: Option<f64>) -> (f64, f64) {
        match self.scale_mode {
            AxisScaleMode::Linear => guarded_range(min, max),
            AxisScaleMode::Log => guarded_log_range(min, max),
        }
    }

    fn check_log_domain(self, value: f64, what: &str) -> ChartResult<()> {
        if self.scale_mode == AxisScaleMode::Log && value <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "{what} on a log axis must be > 0 (got {value})"
            )));
        }
        Ok(())
    }
}

/// Visible window on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub x: AxisBounds,
    pub y: AxisBounds,
}

impl ViewportState {
    #[must_use]
    pub fn axis(self, axis: Axis) -> AxisBounds {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        self.x.contains(x) && self.y.contains(y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Per-axis zoom factors in `(0, 1]`. A factor of `1.0` freezes that axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomFactors {
    pub x: f64,
    pub y: f64,
}

impl ZoomFactors {
    #[must_use]
    pub const fn uniform(factor: f64) -> Self {
        Self {
            x: factor,
            y: factor,
        }
    }

    fn validate(self) -> ChartResult<Self> {
        for (axis, factor) in [("x", self.x), ("y", self.y)] {
            if !factor.is_finite() || factor <= 0.0 || factor > 1.0 {
                return Err(ChartError::InvalidData(format!(
                    "zoom factor for axis {axis} must be finite and in (0, 1]"
                )));
            }
        }
        Ok(self)
    }
}

impl Default for ZoomFactors {
    fn default() -> Self {
        Self::uniform(DEFAULT_ZOOM_FACTOR)
    }
}

/// Owns the visible window of one chart and the data extent it is clamped to.
///
/// Every mutator computes both axes first and commits them in a single
/// assignment, so readers never observe a half-applied gesture step. Failed
/// mutations leave the state untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportController {
    state: ViewportState,
    data_extent: ViewportState,
    x_options: AxisOptions,
    y_options: AxisOptions,
}

impl ViewportController {
    /// Creates a controller whose extent and initial window are `data_extent`.
    pub fn new(
        data_extent: ViewportState,
        x_options: AxisOptions,
        y_options: AxisOptions,
    ) -> ChartResult<Self> {
        let x = AxisBounds::new(data_extent.x.min, data_extent.x.max)?;
        let y = AxisBounds::new(data_extent.y.min, data_extent.y.max)?;
        let data_extent = ViewportState {
            x: positive_extent(x, x_options),
            y: positive_extent(y, y_options),
        };

        Ok(Self {
            state: data_extent,
            data_extent,
            x_options,
            y_options,
        })
    }

    /// Builds the extent from raw column extrema through [`guarded_range`],
    /// or [`guarded_log_range`] on log axes.
    pub fn from_extrema(
        x: (Option<f64>, Option<f64>),
        y: (Option<f64>, Option<f64>),
        x_options: AxisOptions,
        y_options: AxisOptions,
    ) -> ChartResult<Self> {
        let (x_min, x_max) = x_options.guarded_extent(x.0, x.1);
        let (y_min, y_max) = y_options.guarded_extent(y.0, y.1);
        Self::new(
            ViewportState {
                x: AxisBounds::new(x_min, x_max)?,
                y: AxisBounds::new(y_min, y_max)?,
            },
            x_options,
            y_options,
        )
    }

    #[must_use]
    pub fn state(&self) -> ViewportState {
        self.state
    }

    #[must_use]
    pub fn data_extent(&self) -> ViewportState {
        self.data_extent
    }

    #[must_use]
    pub fn axis_options(&self, axis: Axis) -> AxisOptions {
        match axis {
            Axis::X => self.x_options,
            Axis::Y => self.y_options,
        }
    }

    /// Axis-space units covered by one logical pixel on each axis: data
    /// units, or decades on a log axis. This is the scale [`Self::pan`]
    /// expects.
    pub fn units_per_pixel(&self, viewport: Viewport) -> ChartResult<(f64, f64)> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let x_span = self.x_options.bounds_to_axis_space(self.state.x).span();
        let y_span = self.y_options.bounds_to_axis_space(self.state.y).span();
        Ok((
            x_span / f64::from(viewport.width),
            y_span / f64::from(viewport.height),
        ))
    }

    /// Zooms around a data-space anchor, keeping the anchor at the same
    /// fractional position of the window.
    ///
    /// Zooming in multiplies each span by its factor and zooming out divides
    /// by it. A window at least as wide as the extent snaps to the extent; a
    /// narrower window that leaves the extent is translated back inside. An
    /// axis already at [`MIN_RELATIVE_SPAN`] stops zooming in. Log axes scale
    /// and anchor in decades, so the anchor value stays under the cursor.
    pub fn zoom(
        &mut self,
        anchor_x: f64,
        anchor_y: f64,
        direction: ZoomDirection,
        factors: ZoomFactors,
    ) -> ChartResult<ViewportState> {
        if !anchor_x.is_finite() || !anchor_y.is_finite() {
            return Err(ChartError::InvalidData(
                "zoom anchor must be finite".to_owned(),
            ));
        }
        let factors = factors.validate()?;
        self.x_options.check_log_domain(anchor_x, "zoom anchor")?;
        self.y_options.check_log_domain(anchor_y, "zoom anchor")?;

        let next = ViewportState {
            x: zoom_axis(
                self.state.x,
                self.data_extent.x,
                anchor_x,
                direction,
                factors.x,
                self.x_options,
            ),
            y: zoom_axis(
                self.state.y,
                self.data_extent.y,
                anchor_y,
                direction,
                factors.y,
                self.y_options,
            ),
        };
        self.commit(next)
    }

    /// Translates the window by `dx_px * units_per_pixel_x` and
    /// `dy_px * units_per_pixel_y`, clamped to the extent plus a 1% overscroll
    /// tolerance. Positive-only axes keep their minimum above
    /// [`POSITIVE_EPSILON`].
    ///
    /// Units are axis-space units as returned by [`Self::units_per_pixel`].
    pub fn pan(
        &mut self,
        dx_px: f64,
        dy_px: f64,
        units_per_pixel_x: f64,
        units_per_pixel_y: f64,
    ) -> ChartResult<ViewportState> {
        for value in [dx_px, dy_px, units_per_pixel_x, units_per_pixel_y] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(
                    "pan delta and scale must be finite".to_owned(),
                ));
            }
        }

        let next = ViewportState {
            x: pan_axis(
                self.state.x,
                self.data_extent.x,
                dx_px * units_per_pixel_x,
                self.x_options,
            ),
            y: pan_axis(
                self.state.y,
                self.data_extent.y,
                dy_px * units_per_pixel_y,
                self.y_options,
            ),
        };
        self.commit(next)
    }

    /// Replaces the window, shrinking each axis to fit the tolerated extent.
    pub fn set_visible(&mut self, requested: ViewportState) -> ChartResult<ViewportState> {
        let x = AxisBounds::new(requested.x.min, requested.x.max)?;
        let y = AxisBounds::new(requested.y.min, requested.y.max)?;
        self.x_options.check_log_domain(x.min, "visible window")?;
        self.y_options.check_log_domain(y.min, "visible window")?;

        let next = ViewportState {
            x: fit_axis(x, self.data_extent.x, self.x_options),
            y: fit_axis(y, self.data_extent.y, self.y_options),
        };
        self.commit(next)
    }

    pub fn reset(&mut self) -> ViewportState {
        self.state = self.data_extent;
        self.state
    }

    #[must_use]
    pub fn is_at_extent(&self) -> bool {
        self.state == self.data_extent
    }

    fn commit(&mut self, next: ViewportState) -> ChartResult<ViewportState> {
        // A NaN or collapsed window must never become visible.
        AxisBounds::new(next.x.min, next.x.max)?;
        AxisBounds::new(next.y.min, next.y.max)?;
        self.state = next;
        Ok(next)
    }
}

fn positive_extent(extent: AxisBounds, options: AxisOptions) -> AxisBounds {
    if !options.requires_positive() || extent.min >= POSITIVE_AXIS_FLOOR {
        return extent;
    }

    let (fallback_min, fallback_max) = guarded_range(None, None);
    let min = POSITIVE_AXIS_FLOOR;
    let max = if extent.max > min {
        extent.max
    } else {
        min + (fallback_max - fallback_min)
    };
    AxisBounds { min, max }
}

fn zoom_axis(
    bounds: AxisBounds,
    extent: AxisBounds,
    anchor: f64,
    direction: ZoomDirection,
    factor: f64,
    options: AxisOptions,
) -> AxisBounds {
    let window = options.bounds_to_axis_space(bounds);
    let limits = options.bounds_to_axis_space(extent);
    let anchor = options.to_axis_space(anchor);

    let old_span = window.span();
    let new_span = match direction {
        ZoomDirection::In => old_span * factor,
        ZoomDirection::Out => old_span / factor,
    };

    if new_span >= limits.span() {
        return extent;
    }
    if direction == ZoomDirection::In && new_span <= min_zoom_span(window, options) {
        return bounds;
    }

    let fraction = (anchor - window.min) / old_span;
    let min = anchor - fraction * new_span;
    let zoomed = AxisBounds {
        min,
        max: min + new_span,
    };

    let inside = if zoomed.min < limits.min {
        zoomed.shifted(limits.min - zoomed.min)
    } else if zoomed.max > limits.max {
        zoomed.shifted(limits.max - zoomed.max)
    } else {
        zoomed
    };

    let restored = options.bounds_from_axis_space(inside);
    AxisBounds {
        min: restored.min.max(extent.min),
        max: restored.max.min(extent.max),
    }
}

fn min_zoom_span(window: AxisBounds, options: AxisOptions) -> f64 {
    let magnitude = window.min.abs().max(window.max.abs());
    let floor = match options.scale_mode {
        AxisScaleMode::Linear => f64::MIN_POSITIVE,
        AxisScaleMode::Log => MIN_RELATIVE_SPAN,
    };
    (magnitude * MIN_RELATIVE_SPAN).max(floor)
}

/// Overscroll limits in axis space.
fn tolerated_limits(extent: AxisBounds, options: AxisOptions) -> (f64, f64) {
    let limits = options.bounds_to_axis_space(extent);
    let tolerance = limits.span() * OVERSCROLL_TOLERANCE_RATIO;
    let mut lower = limits.min - tolerance;
    if options.requires_positive() {
        lower = lower.max(options.to_axis_space(POSITIVE_AXIS_FLOOR));
    }
    (lower, limits.max + tolerance)
}

fn pan_axis(bounds: AxisBounds, extent: AxisBounds, delta: f64, options: AxisOptions) -> AxisBounds {
    let (lower, upper) = tolerated_limits(extent, options);
    let reach = upper - lower;
    let moved = options
        .bounds_to_axis_space(bounds)
        .shifted(delta.clamp(-reach, reach));

    let translated = if moved.min < lower {
        moved.shifted(lower - moved.min)
    } else if moved.max > upper {
        moved.shifted(upper - moved.max)
    } else {
        moved
    };

    options.bounds_from_axis_space(AxisBounds {
        min: translated.min.max(lower),
        max: translated.max.min(upper),
    })
}

fn fit_axis(bounds: AxisBounds, extent: AxisBounds, options: AxisOptions) -> AxisBounds {
    let (lower, upper) = tolerated_limits(extent, options);
    if options.bounds_to_axis_space(bounds).span() >= upper - lower {
        return extent;
    }
    pan_axis(bounds, extent, 0.0, options)
}
