use crate::error::ChartResult;
use crate::render::{Color, TextPrimitive};

/// Canvas-like drawing API implemented by the host drawing library.
///
/// Coordinates are device pixels. Paths follow 2D-canvas semantics:
/// `begin_path` starts a new path, `fill` and `stroke` paint the current path
/// without consuming it.
pub trait DrawingSurface {
    /// Device pixels per logical pixel.
    fn device_pixel_ratio(&self) -> f64;

    fn clear(&mut self, width_px: f64, height_px: f64, color: Color) -> ChartResult<()>;

    fn begin_path(&mut self);

    /// Appends a circular arc (angles in radians) to the current path.
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64);

    fn fill(&mut self, color: Color) -> ChartResult<()>;

    fn stroke(&mut self, color: Color, width: f64) -> ChartResult<()>;

    fn fill_text(&mut self, text: &TextPrimitive) -> ChartResult<()>;
}
