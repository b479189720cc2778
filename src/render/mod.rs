mod frame;
mod null_surface;
mod primitives;
mod surface;
mod transform;

pub use frame::{PaintStats, RenderFrame};
pub use null_surface::{NullSurface, NullSurfaceStats};
pub use primitives::{Color, MarkerPrimitive, TextHAlign, TextPrimitive};
pub use surface::DrawingSurface;
pub use transform::{CoordinateTransform, ViewportTransform};

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoSurface, CairoSurfaceStats};
