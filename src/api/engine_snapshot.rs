use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Viewport, ViewportState};
use crate::error::{ChartError, ChartResult};
use crate::interaction::InteractionMode;
use crate::render::DrawingSurface;
use crate::spatial::HoverPoint;

use super::legend::LegendEntry;
use super::series_data::DataStatus;
use super::ScatterChart;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSnapshot {
    pub label: String,
    /// Plottable samples before decimation.
    pub source_len: usize,
    /// Samples kept after decimation.
    pub points: usize,
    /// Samples inside the current window.
    pub visible: usize,
}

/// Serializable state snapshot used by regression tests and diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub viewport: Viewport,
    pub viewport_state: ViewportState,
    pub data_extent: ViewportState,
    pub data_status: DataStatus,
    pub series: IndexMap<String, SeriesSnapshot>,
    pub interaction_mode: InteractionMode,
    pub hover: Option<HoverPoint>,
    pub legend: LegendEntry,
    pub indexed_markers: usize,
    pub destroyed: bool,
}

impl<S: DrawingSurface> ScatterChart<S> {
    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        let visible_window = self.viewport.state();
        let series = self
            .series
            .iter()
            .zip(&self.series_data)
            .map(|(config, data)| {
                let visible = data
                    .points
                    .iter()
                    .filter(|point| visible_window.contains(point.x, point.y))
                    .count();
                (
                    config.id.clone(),
                    SeriesSnapshot {
                        label: config.label.clone(),
                        source_len: data.source_len,
                        points: data.points.len(),
                        visible,
                    },
                )
            })
            .collect();

        ChartSnapshot {
            viewport: self.config.viewport,
            viewport_state: visible_window,
            data_extent: self.viewport.data_extent(),
            data_status: self.data_status,
            series,
            interaction_mode: self.interaction.mode(),
            hover: self.hovered_point(),
            legend: self.legend(),
            indexed_markers: self.index.len(),
            destroyed: self.destroyed,
        }
    }

    /// Serializes the snapshot as pretty JSON.
    pub fn snapshot_json(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
