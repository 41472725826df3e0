use std::sync::Arc;

use super::aggregate::{aggregate, round1};
use super::chart::{ChartSpec, genre_rating_chart, release_area_chart, score_scatter_chart};
use crate::data::filter::{FilterSpec, filter_indices};
use crate::data::model::GameDataset;

// ---------------------------------------------------------------------------
// DashboardOutput – one atomic batch of everything the UI shows
// ---------------------------------------------------------------------------

/// The six dashboard outputs, always produced together.
///
/// Means are already rounded for display (one decimal digit); the unrounded
/// values do not leave the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardOutput {
    pub total_games: usize,
    pub mean_user_score: Option<f64>,
    pub mean_critic_score: Option<f64>,
    pub genre_chart: ChartSpec,
    pub scatter_chart: ChartSpec,
    pub area_chart: ChartSpec,
}

/// Format a mean for a stat card, with a placeholder when undefined.
pub fn format_mean(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}"),
        None => "N/A".to_string(),
    }
}

// ---------------------------------------------------------------------------
// DashboardController – control tuple in, output batch out
// ---------------------------------------------------------------------------

/// Binds control values to a full recomputation of all outputs.
///
/// `update` runs the filter → aggregate → chart pipeline synchronously and
/// swaps the whole [`DashboardOutput`] in at once, so the UI never observes
/// a partially updated batch. An invalid control tuple (year min > max) is
/// rejected at this boundary and the last valid spec is reused.
pub struct DashboardController {
    dataset: Arc<GameDataset>,
    spec: FilterSpec,
    output: DashboardOutput,
}

impl DashboardController {
    /// Create a controller with everything selected and compute the
    /// initial batch.
    pub fn new(dataset: Arc<GameDataset>) -> Self {
        let spec = FilterSpec::select_all(&dataset);
        let output = recompute(&dataset, &spec);
        DashboardController {
            dataset,
            spec,
            output,
        }
    }

    /// Apply a new control tuple and recompute the output batch.
    pub fn update(&mut self, spec: FilterSpec) -> &DashboardOutput {
        match spec.validate() {
            Ok(()) => self.spec = spec,
            Err(err) => {
                log::warn!("Rejected filter change ({err}); keeping previous selection");
            }
        }
        self.output = recompute(&self.dataset, &self.spec);
        &self.output
    }

    /// The batch from the most recent recomputation.
    pub fn output(&self) -> &DashboardOutput {
        &self.output
    }

    /// The spec the current output was computed from.
    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn dataset(&self) -> &Arc<GameDataset> {
        &self.dataset
    }
}

fn recompute(dataset: &GameDataset, spec: &FilterSpec) -> DashboardOutput {
    let indices = filter_indices(dataset, spec);
    let agg = aggregate(dataset, &indices);

    DashboardOutput {
        total_games: agg.total,
        mean_user_score: agg.mean_user_score.map(round1),
        mean_critic_score: agg.mean_critic_score.map(round1),
        genre_chart: genre_rating_chart(&agg),
        scatter_chart: score_scatter_chart(dataset, &indices),
        area_chart: release_area_chart(&agg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;
    use std::collections::BTreeSet;

    fn dataset() -> Arc<GameDataset> {
        Arc::new(GameDataset::from_records(vec![
            record("PS4", "Action", 2015, Some(80.0), Some(8.0), Some(15.0)),
            record("PC", "RPG", 2012, Some(70.0), None, Some(12.0)),
        ]))
    }

    #[test]
    fn initial_batch_covers_the_whole_dataset() {
        let ctl = DashboardController::new(dataset());
        let out = ctl.output();

        assert_eq!(out.total_games, 2);
        assert_eq!(out.mean_user_score, Some(8.0));
        assert_eq!(out.mean_critic_score, Some(75.0));
        assert_eq!(out.genre_chart.series.len(), 2);
    }

    #[test]
    fn update_recomputes_all_outputs_together() {
        let ds = dataset();
        let mut ctl = DashboardController::new(ds.clone());

        let mut spec = FilterSpec::select_all(&ds);
        spec.platforms = ["PS4".to_string()].into_iter().collect();
        let out = ctl.update(spec);

        assert_eq!(out.total_games, 1);
        assert_eq!(out.mean_user_score, Some(8.0));
        assert_eq!(out.mean_critic_score, Some(80.0));
        let scatter_points: usize = out.scatter_chart.series.iter().map(|s| s.points.len()).sum();
        assert_eq!(scatter_points, 1);
        assert_eq!(out.area_chart.series.len(), 1);
        assert_eq!(out.area_chart.series[0].name, "PS4");
        assert_eq!(out.area_chart.series[0].points, vec![[2015.0, 1.0]]);
    }

    #[test]
    fn invalid_range_reuses_the_last_valid_spec() {
        let ds = dataset();
        let mut ctl = DashboardController::new(ds.clone());

        let mut narrowed = FilterSpec::select_all(&ds);
        narrowed.years = (2013, 2016);
        ctl.update(narrowed.clone());
        assert_eq!(ctl.output().total_games, 1);

        let mut inverted = FilterSpec::select_all(&ds);
        inverted.years = (2016, 2013);
        let out = ctl.update(inverted);

        // The bad tuple is dropped; outputs still match the narrowed spec.
        assert_eq!(out.total_games, 1);
        assert_eq!(ctl.spec(), &narrowed);
    }

    #[test]
    fn empty_selection_degrades_to_placeholders_not_errors() {
        let ds = dataset();
        let mut ctl = DashboardController::new(ds.clone());

        let mut spec = FilterSpec::select_all(&ds);
        spec.genres = BTreeSet::new();
        let out = ctl.update(spec);

        assert_eq!(out.total_games, 0);
        assert_eq!(out.mean_user_score, None);
        assert_eq!(format_mean(out.mean_user_score), "N/A");
        assert!(out.scatter_chart.series.is_empty());
        assert!(out.area_chart.series.is_empty());
    }

    #[test]
    fn pipeline_is_idempotent_for_a_fixed_spec() {
        let ds = dataset();
        let mut ctl = DashboardController::new(ds.clone());

        let mut spec = FilterSpec::select_all(&ds);
        spec.years = (2012, 2015);
        let first = ctl.update(spec.clone()).clone();
        let second = ctl.update(spec).clone();

        assert_eq!(first, second);
    }

    #[test]
    fn means_are_rounded_to_one_decimal() {
        let ds = Arc::new(GameDataset::from_records(vec![
            record("PC", "RPG", 2012, Some(70.0), Some(7.1), None),
            record("PC", "RPG", 2013, Some(71.0), Some(7.2), None),
            record("PC", "RPG", 2014, Some(72.0), Some(7.2), None),
        ]));
        let ctl = DashboardController::new(ds);

        // Raw mean 7.1666… rounds to 7.2 for display.
        assert_eq!(ctl.output().mean_user_score, Some(7.2));
        assert_eq!(format_mean(ctl.output().mean_user_score), "7.2");
    }
}
