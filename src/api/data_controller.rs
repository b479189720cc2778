use tracing::debug;

use crate::core::{DataRow, TimeRange, ViewportController};
use crate::error::ChartResult;
use crate::extensions::ChartEvent;
use crate::render::DrawingSurface;

use super::series_data::{PreparedData, data_extrema, prepare_series_data};
use super::{ChartConfig, ScatterChart, SeriesConfig, SeriesToggles, derive_series_config};

/// Series, data and viewport rebuilt from candidate inputs, not yet applied.
struct Reload {
    series: Vec<SeriesConfig>,
    prepared: PreparedData,
    viewport: ViewportController,
}

impl<S: DrawingSurface> ScatterChart<S> {
    /// Replaces the loaded rows and rebuilds every series.
    ///
    /// The viewport resets to the new data extent and any hover is dropped.
    /// On failure the chart keeps its previous rows, series and window.
    pub fn set_data(&mut self, rows: Vec<DataRow>) -> ChartResult<()> {
        self.ensure_live()?;
        debug!(rows = rows.len(), "set scatter rows");
        let reload = self.prepare_reload(&rows, &self.config, &self.toggles)?;
        self.rows = rows;
        self.commit_reload(reload);
        Ok(())
    }

    /// Restricts the loaded rows to a time window, or lifts the restriction.
    pub fn set_time_filter(&mut self, time_filter: Option<TimeRange>) -> ChartResult<()> {
        self.ensure_live()?;
        if self.config.time_filter == time_filter {
            return Ok(());
        }
        let mut config = self.config.clone();
        config.time_filter = time_filter;
        config.validate()?;

        debug!(?time_filter, "set time filter");
        let reload = self.prepare_reload(&self.rows, &config, &self.toggles)?;
        self.config = config;
        self.commit_reload(reload);
        Ok(())
    }

    /// Applies on/off flags to optional series and rebuilds the drawn set.
    pub fn set_series_toggles(&mut self, toggles: SeriesToggles) -> ChartResult<()> {
        self.ensure_live()?;
        if self.toggles == toggles {
            return Ok(());
        }
        let reload = self.prepare_reload(&self.rows, &self.config, &toggles)?;
        self.toggles = toggles;
        self.commit_reload(reload);
        Ok(())
    }

    #[must_use]
    pub fn rows(&self) -> &[DataRow] {
        &self.rows
    }

    #[must_use]
    pub fn series_toggles(&self) -> &SeriesToggles {
        &self.toggles
    }

    fn prepare_reload(
        &self,
        rows: &[DataRow],
        config: &ChartConfig,
        toggles: &SeriesToggles,
    ) -> ChartResult<Reload> {
        let series = derive_series_config(&self.base_series, toggles);
        let prepared = prepare_series_data(rows, &series, config);
        let (x, y) = data_extrema(&prepared.series, config.x_axis, config.y_axis);
        let viewport = ViewportController::from_extrema(x, y, config.x_axis, config.y_axis)?;
        Ok(Reload {
            series,
            prepared,
            viewport,
        })
    }

    fn commit_reload(&mut self, reload: Reload) {
        debug!(
            series = reload.series.len(),
            status = ?reload.prepared.status,
            "rebuilt scatter series"
        );

        self.series = reload.series;
        self.series_data = reload.prepared.series;
        self.data_status = reload.prepared.status;
        self.viewport = reload.viewport;
        self.invalidate_index();

        if self.interaction.set_hover(None) {
            self.emit_event(ChartEvent::HoverChanged { hover: None });
        }
        self.emit_event(ChartEvent::DataUpdated {
            rows_len: self.rows.len(),
            series_len: self.series.len(),
        });
        self.emit_event(ChartEvent::ViewportChanged {
            state: self.viewport.state(),
        });
    }
}
