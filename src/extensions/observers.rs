use serde::{Deserialize, Serialize};

use crate::core::{Viewport, ViewportState};
use crate::interaction::InteractionMode;
use crate::spatial::HoverPoint;

/// Read-only state snapshot passed to observer hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartContext {
    pub viewport: Viewport,
    pub viewport_state: ViewportState,
    pub series_len: usize,
    pub indexed_markers: usize,
    pub interaction_mode: InteractionMode,
    pub hover: Option<HoverPoint>,
}

/// Event stream exposed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    DataUpdated { rows_len: usize, series_len: usize },
    ViewportChanged { state: ViewportState },
    HoverChanged { hover: Option<HoverPoint> },
    Resized { width: u32, height: u32 },
    PanStarted,
    PanEnded,
    Rendered { markers_drawn: usize },
    Destroyed,
}

/// Subscription hook for the few host consumers that follow chart state
/// (legends, linked charts, inspectors).
///
/// Observers see events and a context snapshot but cannot mutate the chart.
pub trait ChartObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: ChartEvent, context: ChartContext);
}
