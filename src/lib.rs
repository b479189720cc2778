//! scatter-rs: scatter and bubble chart core.
//!
//! Rows of loosely typed records go through a reduction pipeline (time
//! filter, timestamp normalization, column alignment, decimation) and are
//! drawn onto any [`render::DrawingSurface`]. A clamped viewport controller
//! drives pan and zoom, and a quadtree rebuilt on every redraw answers
//! hover queries.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod spatial;
pub mod telemetry;

pub use api::{ChartConfig, ScatterChart, SeriesConfig, SeriesToggles, derive_series_config};
pub use crate::core::{
    DataRow, FieldValue, Viewport, align_column, decimate, filter_rows_by_time, guarded_range,
    normalize_timestamps,
};
pub use error::{ChartError, ChartResult};
