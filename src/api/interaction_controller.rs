use tracing::{debug, trace};

use crate::core::{Viewport, ViewportState};
use crate::error::{ChartError, ChartResult};
use crate::extensions::ChartEvent;
use crate::interaction::{InteractionMode, zoom_direction_from_wheel};
use crate::render::{CoordinateTransform, DrawingSurface};
use crate::spatial::HoverPoint;

use super::ScatterChart;

fn ensure_finite_position(x: f64, y: f64) -> ChartResult<()> {
    if !x.is_finite() || !y.is_finite() {
        return Err(ChartError::InvalidData(
            "pointer position must be finite".to_owned(),
        ));
    }
    Ok(())
}

impl<S: DrawingSurface> ScatterChart<S> {
    /// Starts a pan gesture at a logical-pixel position.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> ChartResult<()> {
        self.ensure_live()?;
        ensure_finite_position(x, y)?;
        self.interaction.on_pointer_move(x, y);
        self.interaction.on_pan_start(x, y);
        self.emit_event(ChartEvent::PanStarted);
        Ok(())
    }

    /// Moves the cursor. While panning, the window follows the pointer.
    ///
    /// Returns the hovered marker after the move.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<Option<HoverPoint>> {
        self.ensure_live()?;
        ensure_finite_position(x, y)?;
        self.interaction.on_pointer_move(x, y);

        if let Some((dx, dy)) = self.interaction.pan_step(x, y) {
            if dx != 0.0 || dy != 0.0 {
                let (units_x, units_y) = self.viewport.units_per_pixel(self.config.viewport)?;
                let state = self.viewport.pan(-dx, dy, units_x, units_y)?;
                trace!(dx, dy, "pan step");
                self.on_viewport_changed(state);
            }
        }

        self.refresh_hover();
        Ok(self.interaction.hover())
    }

    /// Ends the active pan gesture, if any.
    pub fn pointer_up(&mut self) -> ChartResult<()> {
        self.ensure_live()?;
        self.end_pan();
        Ok(())
    }

    /// Cursor left the surface: ends any pan and clears the hover.
    pub fn pointer_leave(&mut self) -> ChartResult<()> {
        self.ensure_live()?;
        self.end_pan();
        let had_hover = self.interaction.hover().is_some();
        self.interaction.on_pointer_leave();
        if had_hover {
            self.emit_event(ChartEvent::HoverChanged { hover: None });
        }
        Ok(())
    }

    /// Zooms around the cursor. Negative `delta_y` zooms in.
    ///
    /// Returns the new window, or `None` when the delta carries no direction.
    pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64) -> ChartResult<Option<ViewportState>> {
        self.ensure_live()?;
        ensure_finite_position(x, y)?;
        let Some(direction) = zoom_direction_from_wheel(delta_y) else {
            return Ok(None);
        };

        let dpr = self.surface.device_pixel_ratio();
        let (anchor_x, anchor_y) = self.transform()?.to_data(x * dpr, y * dpr)?;
        let state = self
            .viewport
            .zoom(anchor_x, anchor_y, direction, self.config.zoom_factors)?;
        trace!(?direction, anchor_x, anchor_y, "wheel zoom");
        self.on_viewport_changed(state);
        Ok(Some(state))
    }

    /// Changes the logical surface size. The visible window is kept.
    pub fn resize(&mut self, width: u32, height: u32) -> ChartResult<()> {
        self.ensure_live()?;
        let viewport = Viewport::new(width, height);
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport { width, height });
        }
        if viewport == self.config.viewport {
            return Ok(());
        }
        debug!(width, height, "resize scatter chart");
        self.config.viewport = viewport;
        self.invalidate_index();
        self.emit_event(ChartEvent::Resized { width, height });
        Ok(())
    }

    /// Restores the full data extent.
    pub fn reset_viewport(&mut self) -> ChartResult<ViewportState> {
        self.ensure_live()?;
        let state = self.viewport.reset();
        self.on_viewport_changed(state);
        Ok(state)
    }

    /// Shows a programmatic window, clamped to the data extent.
    pub fn set_visible_window(&mut self, requested: ViewportState) -> ChartResult<ViewportState> {
        self.ensure_live()?;
        let state = self.viewport.set_visible(requested)?;
        self.on_viewport_changed(state);
        Ok(state)
    }

    fn end_pan(&mut self) {
        if self.interaction.mode() == InteractionMode::Panning {
            self.interaction.on_pan_end();
            self.emit_event(ChartEvent::PanEnded);
        }
    }

    fn on_viewport_changed(&mut self, state: ViewportState) {
        self.invalidate_index();
        self.emit_event(ChartEvent::ViewportChanged { state });
    }
}
