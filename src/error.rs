use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("no data: {0}")]
    NoData(String),

    #[error("no valid timestamps in field `{field}` ({rows} rows inspected)")]
    NoValidTimestamps { field: String, rows: usize },

    #[error("invalid series config `{series}`: {reason}")]
    InvalidSeriesConfig { series: String, reason: String },

    #[error("chart has been destroyed")]
    Destroyed,
}
