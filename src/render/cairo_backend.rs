use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawingSurface, TextHAlign, TextPrimitive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoSurfaceStats {
    pub arcs_drawn: usize,
    pub fills: usize,
    pub strokes: usize,
    pub texts_drawn: usize,
}

/// Cairo + Pango + PangoCairo drawing surface.
///
/// Either owns an offscreen image surface (`CairoSurface::new`) or draws into
/// an external context such as a GTK `DrawingArea` callback
/// (`CairoSurface::from_context`).
#[derive(Debug)]
pub struct CairoSurface {
    context: Context,
    image: Option<ImageSurface>,
    device_pixel_ratio: f64,
    last_stats: CairoSurfaceStats,
}

impl CairoSurface {
    /// Creates an offscreen surface of `width x height` device pixels.
    pub fn new(width: i32, height: i32, device_pixel_ratio: f64) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let image = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&image)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        let mut surface = Self::from_context(context, device_pixel_ratio)?;
        surface.image = Some(image);
        Ok(surface)
    }

    pub fn from_context(context: Context, device_pixel_ratio: f64) -> ChartResult<Self> {
        if !device_pixel_ratio.is_finite() || device_pixel_ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "device pixel ratio must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            context,
            image: None,
            device_pixel_ratio,
            last_stats: CairoSurfaceStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    /// Offscreen image, when this surface owns one.
    #[must_use]
    pub fn image(&self) -> Option<&ImageSurface> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoSurfaceStats {
        self.last_stats
    }
}

impl DrawingSurface for CairoSurface {
    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    fn clear(&mut self, width_px: f64, height_px: f64, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.last_stats = CairoSurfaceStats::default();
        self.context.new_path();
        apply_color(&self.context, color);
        self.context.rectangle(0.0, 0.0, width_px, height_px);
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to clear surface", err))
    }

    fn begin_path(&mut self) {
        self.context.new_path();
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.context.new_sub_path();
        self.context.arc(cx, cy, radius, start_angle, end_angle);
        self.last_stats.arcs_drawn += 1;
    }

    fn fill(&mut self, color: Color) -> ChartResult<()> {
        apply_color(&self.context, color);
        self.context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill path", err))?;
        self.last_stats.fills += 1;
        Ok(())
    }

    fn stroke(&mut self, color: Color, width: f64) -> ChartResult<()> {
        apply_color(&self.context, color);
        self.context.set_line_width(width);
        self.context
            .stroke_preserve()
            .map_err(|err| map_backend_error("failed to stroke path", err))?;
        self.last_stats.strokes += 1;
        Ok(())
    }

    fn fill_text(&mut self, text: &TextPrimitive) -> ChartResult<()> {
        let layout = pangocairo::functions::create_layout(&self.context);
        let font_description = FontDescription::from_string(&format!("Sans {}", text.font_size_px));
        layout.set_font_description(Some(&font_description));
        layout.set_text(&text.text);

        let (text_width, _text_height) = layout.pixel_size();
        let x = match text.h_align {
            TextHAlign::Left => text.x,
            TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
            TextHAlign::Right => text.x - f64::from(text_width),
        };

        self.context.new_path();
        apply_color(&self.context, text.color);
        self.context.move_to(x, text.y);
        pangocairo::functions::show_layout(&self.context, &layout);
        self.last_stats.texts_drawn += 1;
        Ok(())
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
