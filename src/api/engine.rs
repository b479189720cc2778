use tracing::debug;

use crate::core::{DataRow, Viewport, ViewportController, ViewportState};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{ChartEvent, ChartObserver};
use crate::interaction::{InteractionMode, InteractionState};
use crate::render::{DrawingSurface, PaintStats};
use crate::spatial::{QuadTree, Rect};

use super::series_data::{DataStatus, SeriesData, data_extrema, prepare_series_data};
use super::{
    ChartConfig, SeriesConfig, SeriesToggles, derive_series_config, validate_series_configs,
};

/// Live scatter/bubble chart bound to one drawing surface.
///
/// Owns the loaded rows, the prepared series, the viewport controller and
/// the hover index. All methods run synchronously on the caller's thread.
pub struct ScatterChart<S: DrawingSurface> {
    pub(super) surface: S,
    pub(super) config: ChartConfig,
    pub(super) base_series: Vec<SeriesConfig>,
    pub(super) toggles: SeriesToggles,
    pub(super) series: Vec<SeriesConfig>,
    pub(super) rows: Vec<DataRow>,
    pub(super) series_data: Vec<SeriesData>,
    pub(super) data_status: DataStatus,
    pub(super) viewport: ViewportController,
    pub(super) interaction: InteractionState,
    pub(super) index: QuadTree,
    /// Whether `index` reflects the current viewport, size and data.
    pub(super) index_fresh: bool,
    pub(super) observers: Vec<Box<dyn ChartObserver>>,
    pub(super) last_paint: Option<PaintStats>,
    pub(super) destroyed: bool,
}

impl<S: DrawingSurface> ScatterChart<S> {
    /// Builds a chart from its configuration, series list and initial rows.
    ///
    /// Empty or unusable rows produce a chart in a `NoData` /
    /// `NoValidTimestamps` state rather than an error.
    pub fn new(
        surface: S,
        config: ChartConfig,
        series: Vec<SeriesConfig>,
        rows: Vec<DataRow>,
    ) -> ChartResult<Self> {
        config.validate()?;
        validate_series_configs(&series)?;

        let toggles = SeriesToggles::new();
        let effective = derive_series_config(&series, &toggles);
        let prepared = prepare_series_data(&rows, &effective, &config);
        let (x, y) = data_extrema(&prepared.series, config.x_axis, config.y_axis);
        let viewport = ViewportController::from_extrema(x, y, config.x_axis, config.y_axis)?;
        let index =
            QuadTree::with_capacity(Rect::new(0.0, 0.0, 0.0, 0.0), config.index_node_capacity);

        debug!(
            rows = rows.len(),
            series = effective.len(),
            status = ?prepared.status,
            "scatter chart created"
        );

        Ok(Self {
            surface,
            config,
            base_series: series,
            toggles,
            series: effective,
            rows,
            series_data: prepared.series,
            data_status: prepared.status,
            viewport,
            interaction: InteractionState::default(),
            index,
            index_fresh: false,
            observers: Vec::new(),
            last_paint: None,
            destroyed: false,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    #[must_use]
    pub fn viewport_state(&self) -> ViewportState {
        self.viewport.state()
    }

    #[must_use]
    pub fn data_extent(&self) -> ViewportState {
        self.viewport.data_extent()
    }

    #[must_use]
    pub fn data_status(&self) -> DataStatus {
        self.data_status
    }

    /// Series currently drawn, after toggles.
    #[must_use]
    pub fn series(&self) -> &[SeriesConfig] {
        &self.series
    }

    #[must_use]
    pub fn series_data(&self) -> &[SeriesData] {
        &self.series_data
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    /// Markers registered in the hover index by the last rebuild.
    #[must_use]
    pub fn indexed_markers(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn last_paint_stats(&self) -> Option<PaintStats> {
        self.last_paint
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Releases observers, gesture state and the hover index.
    ///
    /// Safe to call any number of times; later calls do nothing. Mutating
    /// calls on a destroyed chart return [`ChartError::Destroyed`].
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.emit_event(ChartEvent::Destroyed);
        self.observers.clear();
        self.interaction = InteractionState::default();
        self.index.reset(Rect::new(0.0, 0.0, 0.0, 0.0));
        self.index_fresh = false;
        self.destroyed = true;
        debug!("scatter chart destroyed");
    }

    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    pub(super) fn ensure_live(&self) -> ChartResult<()> {
        if self.destroyed {
            return Err(ChartError::Destroyed);
        }
        Ok(())
    }

    pub(super) fn invalidate_index(&mut self) {
        self.index_fresh = false;
    }
}
