use std::collections::BTreeSet;
use std::sync::Arc;

use crate::color::ColorMap;
use crate::dash::controller::{DashboardController, DashboardOutput};
use crate::data::filter::FilterSpec;
use crate::data::model::GameDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The widgets edit the live control values (`selected_*`, `year_*`); any
/// change is pushed to the controller as one new [`FilterSpec`], which
/// recomputes the whole output batch.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded). Shared read-only with
    /// the controller and never mutated after load.
    pub dataset: Option<Arc<GameDataset>>,

    /// Runs the filter → aggregate → chart pipeline.
    pub controller: Option<DashboardController>,

    /// Platforms currently ticked in the side panel.
    pub selected_platforms: BTreeSet<String>,

    /// Genres currently ticked in the side panel.
    pub selected_genres: BTreeSet<String>,

    /// Year-range control, inclusive bounds.
    pub year_from: i32,
    pub year_to: i32,

    /// Fixed per-genre colours for the scatter chart.
    pub genre_colors: ColorMap,

    /// Fixed per-platform colours for the area chart.
    pub platform_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            controller: None,
            selected_platforms: BTreeSet::new(),
            selected_genres: BTreeSet::new(),
            year_from: 0,
            year_to: 0,
            genre_colors: ColorMap::new(Vec::<String>::new()),
            platform_colors: ColorMap::new(Vec::<String>::new()),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: select everything, assign colours,
    /// and compute the initial output batch.
    pub fn set_dataset(&mut self, dataset: GameDataset) {
        let dataset = Arc::new(dataset);

        self.selected_platforms = dataset.platforms.clone();
        self.selected_genres = dataset.genres.clone();
        self.year_from = dataset.year_min;
        self.year_to = dataset.year_max;

        self.genre_colors = ColorMap::new(dataset.genres.iter().cloned());
        self.platform_colors = ColorMap::new(dataset.platforms.iter().cloned());

        self.controller = Some(DashboardController::new(dataset.clone()));
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// The control tuple as the widgets currently show it.
    pub fn control_spec(&self) -> FilterSpec {
        FilterSpec {
            platforms: self.selected_platforms.clone(),
            genres: self.selected_genres.clone(),
            years: (self.year_from, self.year_to),
        }
    }

    /// Push the current control values through the pipeline.
    pub fn recompute(&mut self) {
        let spec = self.control_spec();
        if let Some(ctl) = &mut self.controller {
            ctl.update(spec);
        }
    }

    /// The batch from the most recent recomputation.
    pub fn output(&self) -> Option<&DashboardOutput> {
        self.controller.as_ref().map(|ctl| ctl.output())
    }

    /// Select all platforms.
    pub fn select_all_platforms(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selected_platforms = ds.platforms.clone();
        }
    }

    /// Deselect all platforms.
    pub fn select_no_platforms(&mut self) {
        self.selected_platforms.clear();
    }

    /// Select all genres.
    pub fn select_all_genres(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selected_genres = ds.genres.clone();
        }
    }

    /// Deselect all genres.
    pub fn select_no_genres(&mut self) {
        self.selected_genres.clear();
    }
}
