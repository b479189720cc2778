use serde::{Deserialize, Serialize};

use crate::core::ZoomDirection;
use crate::spatial::HoverPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Panning,
}

/// Maps a wheel delta to a zoom direction (negative scrolls zoom in).
///
/// Returns `None` for a zero or non-finite delta.
#[must_use]
pub fn zoom_direction_from_wheel(delta_y: f64) -> Option<ZoomDirection> {
    if !delta_y.is_finite() || delta_y == 0.0 {
        None
    } else if delta_y < 0.0 {
        Some(ZoomDirection::In)
    } else {
        Some(ZoomDirection::Out)
    }
}

/// Pointer and gesture state for one chart, in logical pixels.
///
/// A pan gesture lives from `on_pan_start` to `on_pan_end`; in between each
/// `pan_step` reports the movement since the previous step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    mode: InteractionMode,
    cursor: Option<(f64, f64)>,
    drag_anchor: Option<(f64, f64)>,
    hover: Option<HoverPoint>,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Idle,
            cursor: None,
            drag_anchor: None,
            hover: None,
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn cursor(self) -> Option<(f64, f64)> {
        self.cursor
    }

    #[must_use]
    pub fn hover(self) -> Option<HoverPoint> {
        self.hover
    }

    /// Stores the hovered marker and reports whether a different marker (or
    /// none) is now hovered. A moved box of the same marker is not a change.
    pub fn set_hover(&mut self, hover: Option<HoverPoint>) -> bool {
        let target = |hover: Option<HoverPoint>| hover.map(|h| (h.series_id, h.data_index));
        let changed = target(self.hover) != target(hover);
        self.hover = hover;
        changed
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.cursor = Some((x, y));
    }

    pub fn on_pointer_leave(&mut self) {
        self.cursor = None;
        self.hover = None;
    }

    pub fn on_pan_start(&mut self, x: f64, y: f64) {
        self.mode = InteractionMode::Panning;
        self.drag_anchor = Some((x, y));
    }

    /// Returns the pointer movement since the last step of the active pan.
    pub fn pan_step(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        if self.mode != InteractionMode::Panning {
            return None;
        }
        let (last_x, last_y) = self.drag_anchor.replace((x, y))?;
        Some((x - last_x, y - last_y))
    }

    pub fn on_pan_end(&mut self) {
        self.mode = InteractionMode::Idle;
        self.drag_anchor = None;
    }
}
