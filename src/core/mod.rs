pub mod alignment;
pub mod decimation;
pub mod primitives;
pub mod range;
pub mod scale;
pub mod timestamps;
pub mod types;
pub mod viewport;
pub mod windowing;

pub use alignment::{AlignedColumn, align_column, column_extent};
pub use decimation::{decimate, decimation_stride};
pub use range::{guarded_log_range, guarded_range};
pub use scale::{AxisScaleMode, LinearScale};
pub use timestamps::{SortedTimeSeries, normalize_timestamps};
pub use types::{DataRow, FieldValue, Viewport};
pub use viewport::{
    Axis, AxisBounds, AxisOptions, ViewportController, ViewportState, ZoomDirection, ZoomFactors,
};
pub use windowing::{TimeRange, filter_rows_by_time};
