//! Hooks for host code that follows chart state without owning it.

pub mod observers;

pub use observers::{ChartContext, ChartEvent, ChartObserver};
