use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Where a series takes its x values from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum XSource {
    /// Normalized row time (epoch seconds or milliseconds).
    Time,
    /// A numeric column such as longitude.
    Column(String),
}

/// Whether a series can be switched off at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesVisibility {
    Always,
    Optional { default_visible: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    pub id: String,
    pub label: String,
    pub x: XSource,
    pub y_column: String,
    /// Bubble size column; `None` draws fixed-size scatter markers.
    #[serde(default)]
    pub size_column: Option<String>,
    pub color: Color,
    #[serde(default = "default_visibility")]
    pub visibility: SeriesVisibility,
}

impl SeriesConfig {
    /// Time-indexed scatter series plotting `y_column` against row time.
    #[must_use]
    pub fn time_scatter(id: impl Into<String>, y_column: impl Into<String>, color: Color) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            x: XSource::Time,
            y_column: y_column.into(),
            size_column: None,
            color,
            visibility: SeriesVisibility::Always,
        }
    }

    /// Scatter series plotting two numeric columns against each other.
    #[must_use]
    pub fn xy_scatter(
        id: impl Into<String>,
        x_column: impl Into<String>,
        y_column: impl Into<String>,
        color: Color,
    ) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            x: XSource::Column(x_column.into()),
            y_column: y_column.into(),
            size_column: None,
            color,
            visibility: SeriesVisibility::Always,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_size_column(mut self, size_column: impl Into<String>) -> Self {
        self.size_column = Some(size_column.into());
        self
    }

    #[must_use]
    pub fn optional(mut self, default_visible: bool) -> Self {
        self.visibility = SeriesVisibility::Optional { default_visible };
        self
    }

    #[must_use]
    pub fn uses_time(&self) -> bool {
        self.x == XSource::Time
    }

    fn invalid(&self, reason: impl Into<String>) -> ChartError {
        ChartError::InvalidSeriesConfig {
            series: self.id.clone(),
            reason: reason.into(),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.id.trim().is_empty() {
            return Err(self.invalid("series id must not be empty"));
        }
        if self.y_column.trim().is_empty() {
            return Err(self.invalid("y column must not be empty"));
        }
        if let XSource::Column(column) = &self.x {
            if column.trim().is_empty() {
                return Err(self.invalid("x column must not be empty"));
            }
        }
        if self
            .size_column
            .as_deref()
            .is_some_and(|column| column.trim().is_empty())
        {
            return Err(self.invalid("size column must not be empty"));
        }
        self.color
            .validate()
            .map_err(|err| self.invalid(err.to_string()))
    }
}

fn default_visibility() -> SeriesVisibility {
    SeriesVisibility::Always
}

/// Runtime on/off flags for optional series, keyed by series id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesToggles {
    flags: IndexMap<String, bool>,
}

impl SeriesToggles {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, series_id: impl Into<String>, enabled: bool) -> Self {
        self.flags.insert(series_id.into(), enabled);
        self
    }

    pub fn set(&mut self, series_id: impl Into<String>, enabled: bool) {
        self.flags.insert(series_id.into(), enabled);
    }

    #[must_use]
    pub fn get(&self, series_id: &str) -> Option<bool> {
        self.flags.get(series_id).copied()
    }
}

/// Validates a series list: every entry valid and ids unique.
pub fn validate_series_configs(series: &[SeriesConfig]) -> ChartResult<()> {
    let mut seen = HashSet::with_capacity(series.len());
    for config in series {
        config.validate()?;
        if !seen.insert(config.id.as_str()) {
            return Err(config.invalid("duplicate series id"));
        }
    }
    Ok(())
}

/// Resolves the series list to draw from the base list and toggle flags.
///
/// `Always` series are kept; `Optional` series are kept when their flag (or,
/// without a flag, their default) enables them. Order follows `base`.
#[must_use]
pub fn derive_series_config(base: &[SeriesConfig], toggles: &SeriesToggles) -> Vec<SeriesConfig> {
    base.iter()
        .filter(|config| match config.visibility {
            SeriesVisibility::Always => true,
            SeriesVisibility::Optional { default_visible } => {
                toggles.get(&config.id).unwrap_or(default_visible)
            }
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{SeriesConfig, SeriesToggles, derive_series_config, validate_series_configs};
    use crate::error::ChartError;
    use crate::render::Color;

    fn base() -> Vec<SeriesConfig> {
        vec![
            SeriesConfig::time_scatter("temp", "temp", Color::rgb(0.8, 0.1, 0.1)),
            SeriesConfig::time_scatter("humidity", "humidity", Color::rgb(0.1, 0.1, 0.8))
                .optional(false),
            SeriesConfig::time_scatter("pressure", "pressure", Color::rgb(0.1, 0.6, 0.1))
                .optional(true),
        ]
    }

    fn ids(series: &[SeriesConfig]) -> Vec<&str> {
        series.iter().map(|config| config.id.as_str()).collect()
    }

    #[test]
    fn defaults_apply_without_flags() {
        let derived = derive_series_config(&base(), &SeriesToggles::new());
        assert_eq!(ids(&derived), vec!["temp", "pressure"]);
    }

    #[test]
    fn flags_override_defaults_but_not_always_series() {
        let toggles = SeriesToggles::new()
            .with("humidity", true)
            .with("pressure", false)
            .with("temp", false);
        let derived = derive_series_config(&base(), &toggles);
        assert_eq!(ids(&derived), vec!["temp", "humidity"]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut series = base();
        series.push(SeriesConfig::time_scatter("temp", "other", Color::rgb(0.0, 0.0, 0.0)));
        let err = validate_series_configs(&series).expect_err("duplicate");
        assert!(matches!(err, ChartError::InvalidSeriesConfig { series, .. } if series == "temp"));
    }
}
