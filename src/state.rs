use std::path::Path;
use std::sync::Arc;

use crate::color::OutcomeColors;
use crate::data::cache::load_cached;
use crate::data::filter::FilterParams;
use crate::data::loader::{LoadOutcome, DATA_PATH};
use crate::data::render::{on_filters_changed, RenderModel};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Memoized load result (dataset or error message).
    pub load: Arc<LoadOutcome>,

    /// Current widget values.
    pub params: FilterParams,

    /// Derived view for `params`; `None` when loading failed or produced no rows.
    pub model: Option<RenderModel>,

    /// Scatter hue for the outcome values currently in view.
    pub scatter_colors: OutcomeColors,
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_load(load_cached(Path::new(DATA_PATH)))
    }
}

impl AppState {
    /// Build the state around an already loaded (or failed) dataset.
    pub fn from_load(load: Arc<LoadOutcome>) -> Self {
        let mut state = Self {
            load,
            params: FilterParams::default(),
            model: None,
            scatter_colors: OutcomeColors::default(),
        };
        state.on_filters_changed();
        state
    }

    /// Recompute the render model after any widget change.
    pub fn on_filters_changed(&mut self) {
        if !self.load.is_renderable() {
            self.model = None;
            return;
        }
        let model = on_filters_changed(&self.load.dataset, &self.params);
        self.scatter_colors = OutcomeColors::new(model.scatter.iter().map(|s| s.outcome));
        self.model = Some(model);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::tests::sample;

    fn loaded() -> AppState {
        AppState::from_load(Arc::new(LoadOutcome {
            dataset: Arc::new(sample()),
            error: None,
        }))
    }

    #[test]
    fn initial_model_uses_default_filters() {
        let state = loaded();
        let model = state.model.as_ref().unwrap();
        assert_eq!(model.params, FilterParams::default());
        assert_eq!(model.rows, vec![0, 2, 3]);
    }

    #[test]
    fn changing_filters_recomputes() {
        let mut state = loaded();
        state.params = FilterParams::identity();
        state.on_filters_changed();
        assert_eq!(state.model.as_ref().unwrap().rows, vec![0, 1, 2, 3]);
    }

    #[test]
    fn failed_load_short_circuits() {
        let state = AppState::from_load(Arc::new(LoadOutcome {
            error: Some("Error cargando el archivo CSV: nope".into()),
            ..Default::default()
        }));
        assert!(state.model.is_none());
    }

    #[test]
    fn empty_dataset_short_circuits() {
        let state = AppState::from_load(Arc::new(LoadOutcome::default()));
        assert!(state.model.is_none());
    }
}
