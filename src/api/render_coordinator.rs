use tracing::trace;

use crate::error::ChartResult;
use crate::extensions::ChartEvent;
use crate::render::{
    Color, DrawingSurface, MarkerPrimitive, PaintStats, RenderFrame, TextHAlign, TextPrimitive,
};

use super::ScatterChart;

const HOVER_LABEL_FONT_PX: f64 = 12.0;
const HOVER_LABEL_GAP_PX: f64 = 4.0;
const HIGHLIGHT_STROKE_PX: f64 = 1.5;
const HOVER_LABEL_COLOR: Color = Color::rgb(0.12, 0.12, 0.12);

impl<S: DrawingSurface> ScatterChart<S> {
    /// Redraws the chart: projects and culls markers, rebuilds the hover
    /// index, re-resolves the hover under the stored cursor and paints.
    pub fn render(&mut self) -> ChartResult<PaintStats> {
        self.ensure_live()?;
        let frame = self.build_render_frame()?;
        let stats = frame.paint(&mut self.surface)?;

        trace!(
            markers = stats.markers_drawn,
            highlights = stats.highlights_drawn,
            texts = stats.texts_drawn,
            "render pass"
        );
        self.last_paint = Some(stats);
        self.emit_event(ChartEvent::Rendered {
            markers_drawn: stats.markers_drawn,
        });
        Ok(stats)
    }

    /// Builds the frame the next `render` would paint.
    ///
    /// Rebuilds the hover index as a side effect, since every frame owns a
    /// fresh index.
    pub fn build_render_frame(&mut self) -> ChartResult<RenderFrame> {
        self.ensure_live()?;
        let markers = self.rebuild_index()?;
        self.refresh_hover();

        let dpr = self.surface.device_pixel_ratio();
        let mut frame = RenderFrame::new(self.config.viewport, dpr, self.config.background);
        frame.markers.reserve(markers.len());
        for marker in &markers {
            let color = self
                .series
                .get(marker.series_id)
                .map_or(HOVER_LABEL_COLOR, |series| series.color);
            frame
                .markers
                .push(MarkerPrimitive::new(marker.cx, marker.cy, marker.radius, color));
        }

        let Some(hover) = self.interaction.hover() else {
            return Ok(frame);
        };

        let (cx, cy) = hover.bbox.center();
        let radius = hover.bbox.w / 2.0 + self.config.marker_sizing.highlight_padding * dpr;
        let highlight = self.config.highlight_color;
        frame = frame.with_highlight(
            MarkerPrimitive::new(cx, cy, radius, highlight.with_alpha(0.35))
                .with_stroke(highlight, HIGHLIGHT_STROKE_PX * dpr),
        );

        if self.config.show_hover_label {
            let legend = self.legend();
            if !legend.is_placeholder() {
                let (width, _) = self.transform()?.device_size();
                let gap = HOVER_LABEL_GAP_PX * dpr;
                let (x, h_align) = if cx + radius + gap < width * 0.75 {
                    (cx + radius + gap, TextHAlign::Left)
                } else {
                    (cx - radius - gap, TextHAlign::Right)
                };
                frame = frame.with_text(TextPrimitive::new(
                    legend.summary(),
                    x,
                    (cy - radius).max(0.0),
                    HOVER_LABEL_FONT_PX * dpr,
                    HOVER_LABEL_COLOR,
                    h_align,
                ));
            }
        }

        Ok(frame)
    }
}
