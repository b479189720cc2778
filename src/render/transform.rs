use crate::core::{AxisOptions, LinearScale, Viewport, ViewportState};
use crate::error::{ChartError, ChartResult};

/// Bidirectional data/pixel mapping supplied by the drawing host.
///
/// Pixel coordinates are device pixels with the origin at the top-left
/// corner and y growing downward.
pub trait CoordinateTransform {
    fn to_pixel(&self, data_x: f64, data_y: f64) -> ChartResult<(f64, f64)>;
    fn to_data(&self, pixel_x: f64, pixel_y: f64) -> ChartResult<(f64, f64)>;
}

/// Default transform mapping a [`ViewportState`] onto a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    x_scale: LinearScale,
    y_scale: LinearScale,
    width_px: f64,
    height_px: f64,
    device_pixel_ratio: f64,
}

impl ViewportTransform {
    pub fn new(
        state: ViewportState,
        x_options: AxisOptions,
        y_options: AxisOptions,
        viewport: Viewport,
        device_pixel_ratio: f64,
    ) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if !device_pixel_ratio.is_finite() || device_pixel_ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "device pixel ratio must be finite and > 0".to_owned(),
            ));
        }

        Ok(Self {
            x_scale: LinearScale::new_with_mode(state.x.min, state.x.max, x_options.scale_mode)?,
            y_scale: LinearScale::new_with_mode(state.y.min, state.y.max, y_options.scale_mode)?,
            width_px: f64::from(viewport.width),
            height_px: f64::from(viewport.height),
            device_pixel_ratio,
        })
    }

    #[must_use]
    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// Surface size in device pixels.
    #[must_use]
    pub fn device_size(&self) -> (f64, f64) {
        (
            self.width_px * self.device_pixel_ratio,
            self.height_px * self.device_pixel_ratio,
        )
    }
}

impl CoordinateTransform for ViewportTransform {
    fn to_pixel(&self, data_x: f64, data_y: f64) -> ChartResult<(f64, f64)> {
        let x = self.x_scale.domain_to_pixel(data_x, self.width_px)?;
        let y = self.height_px - self.y_scale.domain_to_pixel(data_y, self.height_px)?;
        Ok((x * self.device_pixel_ratio, y * self.device_pixel_ratio))
    }

    fn to_data(&self, pixel_x: f64, pixel_y: f64) -> ChartResult<(f64, f64)> {
        let x = pixel_x / self.device_pixel_ratio;
        let y = self.height_px - pixel_y / self.device_pixel_ratio;
        Ok((
            self.x_scale.pixel_to_domain(x, self.width_px)?,
            self.y_scale.pixel_to_domain(y, self.height_px)?,
        ))
    }
}
