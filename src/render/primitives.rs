use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self::rgba(self.red, self.green, self.blue, alpha)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Filled circle with optional outline, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerPrimitive {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub fill_color: Color,
    pub stroke_color: Color,
    pub stroke_width: f64,
}

impl MarkerPrimitive {
    #[must_use]
    pub const fn new(cx: f64, cy: f64, radius: f64, fill_color: Color) -> Self {
        Self {
            cx,
            cy,
            radius,
            fill_color,
            stroke_color: fill_color,
            stroke_width: 0.0,
        }
    }

    #[must_use]
    pub const fn with_stroke(mut self, stroke_color: Color, stroke_width: f64) -> Self {
        self.stroke_color = stroke_color;
        self.stroke_width = stroke_width;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.cx.is_finite() || !self.cy.is_finite() {
            return Err(ChartError::InvalidData(
                "marker center must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ChartError::InvalidData(
                "marker radius must be finite and > 0".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(ChartError::InvalidData(
                "marker stroke width must be finite and >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()?;
        self.stroke_color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in device pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}
