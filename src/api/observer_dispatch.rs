use tracing::{debug, warn};

use crate::error::ChartResult;
use crate::extensions::{ChartContext, ChartEvent, ChartObserver};
use crate::render::DrawingSurface;

use super::ScatterChart;

impl<S: DrawingSurface> ScatterChart<S> {
    /// Registers an observer. An observer with the same id is replaced.
    pub fn subscribe(&mut self, observer: Box<dyn ChartObserver>) -> ChartResult<()> {
        self.ensure_live()?;
        let id = observer.id().to_owned();
        if let Some(slot) = self.observers.iter_mut().find(|existing| existing.id() == id) {
            warn!(observer = %id, "replacing observer with duplicate id");
            *slot = observer;
        } else {
            debug!(observer = %id, "observer subscribed");
            self.observers.push(observer);
        }
        Ok(())
    }

    /// Removes an observer by id and reports whether one was registered.
    pub fn unsubscribe(&mut self, observer_id: &str) -> bool {
        let before = self.observers.len();
        self.observers.retain(|observer| observer.id() != observer_id);
        self.observers.len() != before
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub(super) fn observer_context(&self) -> ChartContext {
        ChartContext {
            viewport: self.config.viewport,
            viewport_state: self.viewport.state(),
            series_len: self.series.len(),
            indexed_markers: self.index.len(),
            interaction_mode: self.interaction.mode(),
            hover: self.interaction.hover(),
        }
    }

    pub(super) fn emit_event(&mut self, event: ChartEvent) {
        if self.observers.is_empty() {
            return;
        }
        let context = self.observer_context();
        for observer in &mut self.observers {
            observer.on_event(event, context);
        }
    }
}
