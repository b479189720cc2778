use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawingSurface, MarkerPrimitive, TextPrimitive};

/// Draw-call counters for one painted frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaintStats {
    pub markers_drawn: usize,
    pub highlights_drawn: usize,
    pub texts_drawn: usize,
}

/// Backend-agnostic scene for one chart draw pass, in device pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub device_pixel_ratio: f64,
    pub background: Color,
    pub markers: Vec<MarkerPrimitive>,
    pub highlight: Option<MarkerPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport, device_pixel_ratio: f64, background: Color) -> Self {
        Self {
            viewport,
            device_pixel_ratio,
            background,
            markers: Vec::new(),
            highlight: None,
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_marker(mut self, marker: MarkerPrimitive) -> Self {
        self.markers.push(marker);
        self
    }

    #[must_use]
    pub fn with_highlight(mut self, highlight: MarkerPrimitive) -> Self {
        self.highlight = Some(highlight);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.device_pixel_ratio.is_finite() || self.device_pixel_ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "device pixel ratio must be finite and > 0".to_owned(),
            ));
        }
        self.background.validate()?;

        for marker in self.markers.iter().chain(self.highlight.iter()) {
            marker.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty() && self.highlight.is_none() && self.texts.is_empty()
    }

    /// Validates the frame, then paints background, markers, highlight and
    /// labels in that order.
    pub fn paint<S: DrawingSurface + ?Sized>(&self, surface: &mut S) -> ChartResult<PaintStats> {
        self.validate()?;

        let mut stats = PaintStats::default();
        surface.clear(
            f64::from(self.viewport.width) * self.device_pixel_ratio,
            f64::from(self.viewport.height) * self.device_pixel_ratio,
            self.background,
        )?;

        for marker in &self.markers {
            paint_marker(surface, marker)?;
            stats.markers_drawn += 1;
        }
        if let Some(highlight) = &self.highlight {
            paint_marker(surface, highlight)?;
            stats.highlights_drawn += 1;
        }
        for text in &self.texts {
            surface.fill_text(text)?;
            stats.texts_drawn += 1;
        }

        Ok(stats)
    }
}

fn paint_marker<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    marker: &MarkerPrimitive,
) -> ChartResult<()> {
    surface.begin_path();
    surface.arc(marker.cx, marker.cy, marker.radius, 0.0, TAU);
    surface.fill(marker.fill_color)?;
    if marker.stroke_width > 0.0 {
        surface.stroke(marker.stroke_color, marker.stroke_width)?;
    }
    Ok(())
}
