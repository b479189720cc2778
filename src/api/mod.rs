//! Public chart handle and the glue between data, viewport, index and surface.

mod data_controller;
mod engine;
mod engine_config;
mod engine_snapshot;
mod hover_controller;
mod interaction_controller;
mod legend;
mod observer_dispatch;
mod render_coordinator;
mod series_config;
mod series_data;
mod series_projection;

pub use engine::ScatterChart;
pub use engine_config::{ChartConfig, DEFAULT_MAX_POINTS_PER_SERIES, MarkerSizing};
pub use engine_snapshot::{ChartSnapshot, SeriesSnapshot};
pub use legend::{LEGEND_PLACEHOLDER, LegendEntry, format_legend, format_number, lookup_point};
pub use series_config::{
    SeriesConfig, SeriesToggles, SeriesVisibility, XSource, derive_series_config,
    validate_series_configs,
};
pub use series_data::{
    DataStatus, PreparedData, SeriesData, SeriesPoint, data_extrema, marker_radius,
    prepare_series_data,
};
pub use series_projection::{ProjectedMarker, project_markers};
