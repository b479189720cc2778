use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawingSurface, TextPrimitive};

/// Operation counters recorded by [`NullSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NullSurfaceStats {
    pub clears: usize,
    pub paths: usize,
    pub arcs: usize,
    pub fills: usize,
    pub strokes: usize,
    pub texts: usize,
}

/// Headless surface used by tests and non-visual hosts.
///
/// Counts draw operations since the last `clear` and keeps the labels it was
/// asked to draw, so tests can assert on paint output without a backend.
#[derive(Debug, Clone)]
pub struct NullSurface {
    device_pixel_ratio: f64,
    pub last_stats: NullSurfaceStats,
    pub last_texts: Vec<String>,
}

impl NullSurface {
    #[must_use]
    pub fn with_device_pixel_ratio(device_pixel_ratio: f64) -> Self {
        Self {
            device_pixel_ratio,
            last_stats: NullSurfaceStats::default(),
            last_texts: Vec::new(),
        }
    }
}

impl Default for NullSurface {
    fn default() -> Self {
        Self::with_device_pixel_ratio(1.0)
    }
}

impl DrawingSurface for NullSurface {
    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    fn clear(&mut self, width_px: f64, height_px: f64, color: Color) -> ChartResult<()> {
        if !width_px.is_finite() || !height_px.is_finite() || width_px <= 0.0 || height_px <= 0.0
        {
            return Err(ChartError::InvalidData(
                "surface size must be finite and > 0".to_owned(),
            ));
        }
        color.validate()?;
        self.last_stats = NullSurfaceStats {
            clears: 1,
            ..NullSurfaceStats::default()
        };
        self.last_texts.clear();
        Ok(())
    }

    fn begin_path(&mut self) {
        self.last_stats.paths += 1;
    }

    fn arc(&mut self, _cx: f64, _cy: f64, _radius: f64, _start_angle: f64, _end_angle: f64) {
        self.last_stats.arcs += 1;
    }

    fn fill(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.last_stats.fills += 1;
        Ok(())
    }

    fn stroke(&mut self, color: Color, width: f64) -> ChartResult<()> {
        color.validate()?;
        if !width.is_finite() || width <= 0.0 {
            return Err(ChartError::InvalidData(
                "stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.last_stats.strokes += 1;
        Ok(())
    }

    fn fill_text(&mut self, text: &TextPrimitive) -> ChartResult<()> {
        text.validate()?;
        self.last_stats.texts += 1;
        self.last_texts.push(text.text.clone());
        Ok(())
    }
}
