use tracing::{trace, warn};

use crate::error::ChartResult;
use crate::extensions::ChartEvent;
use crate::render::DrawingSurface;
use crate::spatial::{HoverPoint, IndexedItem, Rect, resolve_hover};

use super::legend::{LegendEntry, format_legend, lookup_point};
use super::series_data::SeriesPoint;
use super::series_projection::ProjectedMarker;
use super::ScatterChart;

impl<S: DrawingSurface> ScatterChart<S> {
    /// Marker currently under the cursor, as of the last pointer move or
    /// render. Always `None` after `destroy`.
    #[must_use]
    pub fn hovered_point(&self) -> Option<HoverPoint> {
        if self.destroyed {
            return None;
        }
        self.interaction.hover()
    }

    /// Legend labels for the hovered point, or placeholders.
    #[must_use]
    pub fn legend(&self) -> LegendEntry {
        format_legend(
            self.hovered_point(),
            &self.series,
            &self.series_data,
            &self.config,
        )
    }

    /// Looks up a drawn point by series position and point index.
    pub fn point_at(&self, series_id: usize, data_index: usize) -> ChartResult<SeriesPoint> {
        lookup_point(&self.series, &self.series_data, series_id, data_index)
            .map(|(_, point)| *point)
    }

    /// Hit-tests a position in logical pixels, rebuilding a stale index first.
    pub fn hover_at(&mut self, x: f64, y: f64) -> ChartResult<Option<HoverPoint>> {
        self.ensure_live()?;
        if !self.index_fresh {
            self.rebuild_index()?;
        }
        let dpr = self.surface.device_pixel_ratio();
        Ok(resolve_hover(&self.index, x * dpr, y * dpr))
    }

    /// Re-projects visible markers and refills the hover index with their
    /// device-pixel boxes.
    pub(super) fn rebuild_index(&mut self) -> ChartResult<Vec<ProjectedMarker>> {
        let markers = self.project_visible_markers()?;
        let (width, height) = self.transform()?.device_size();

        self.index.reset(Rect::new(0.0, 0.0, width, height));
        for marker in &markers {
            self.index.insert(IndexedItem {
                bbox: Rect::centered(marker.cx, marker.cy, marker.radius),
                series_id: marker.series_id,
                data_index: marker.data_index,
            });
        }
        self.index_fresh = true;
        trace!(
            markers = markers.len(),
            depth = self.index.depth(),
            "rebuilt hover index"
        );
        Ok(markers)
    }

    /// Recomputes the hover from the stored cursor and notifies observers on
    /// change.
    pub(super) fn refresh_hover(&mut self) {
        let hover = match self.interaction.cursor() {
            Some((x, y)) => match self.hover_at(x, y) {
                Ok(hover) => hover,
                Err(err) => {
                    warn!(error = %err, "hover lookup failed");
                    None
                }
            },
            None => None,
        };
        if self.interaction.set_hover(hover) {
            self.emit_event(ChartEvent::HoverChanged { hover });
        }
    }
}
