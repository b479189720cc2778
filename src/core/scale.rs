use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Value-to-coordinate mapping mode for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisScaleMode {
    #[default]
    Linear,
    /// Base-10 logarithmic mapping; domain must be strictly positive.
    Log,
}

/// One-dimensional mapping between a data domain and a pixel span `[0, span_px]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    mode: AxisScaleMode,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        Self::new_with_mode(domain_start, domain_end, AxisScaleMode::Linear)
    }

    pub fn new_with_mode(
        domain_start: f64,
        domain_end: f64,
        mode: AxisScaleMode,
    ) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if mode == AxisScaleMode::Log && (domain_start <= 0.0 || domain_end <= 0.0) {
            return Err(ChartError::InvalidData(
                "log scale domain must be > 0".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            mode,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn mode(self) -> AxisScaleMode {
        self.mode
    }

    pub fn domain_to_pixel(self, value: f64, span_px: f64) -> ChartResult<f64> {
        validate_span(span_px)?;
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let (start, end) = self.transformed_domain();
        let normalized = (self.to_transformed(value)? - start) / (end - start);
        Ok(normalized * span_px)
    }

    pub fn pixel_to_domain(self, pixel: f64, span_px: f64) -> ChartResult<f64> {
        validate_span(span_px)?;
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let (start, end) = self.transformed_domain();
        let transformed = start + (pixel / span_px) * (end - start);
        Ok(self.from_transformed(transformed))
    }

    fn transformed_domain(self) -> (f64, f64) {
        match self.mode {
            AxisScaleMode::Linear => (self.domain_start, self.domain_end),
            AxisScaleMode::Log => (self.domain_start.log10(), self.domain_end.log10()),
        }
    }

    fn to_transformed(self, value: f64) -> ChartResult<f64> {
        match self.mode {
            AxisScaleMode::Linear => Ok(value),
            AxisScaleMode::Log if value > 0.0 => Ok(value.log10()),
            AxisScaleMode::Log => Err(ChartError::InvalidData(
                "log scale value must be > 0".to_owned(),
            )),
        }
    }

    fn from_transformed(self, transformed: f64) -> f64 {
        match self.mode {
            AxisScaleMode::Linear => transformed,
            AxisScaleMode::Log => 10f64.powf(transformed),
        }
    }
}

fn validate_span(span_px: f64) -> ChartResult<()> {
    if !span_px.is_finite() || span_px <= 0.0 {
        return Err(ChartError::InvalidData(
            "pixel span must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}
