use serde::{Deserialize, Serialize};

use super::aggregate::AggregateResult;
use crate::data::model::GameDataset;

// ---------------------------------------------------------------------------
// ChartSpec – renderer-agnostic chart description
// ---------------------------------------------------------------------------

/// How one series should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesKind {
    /// Grouped bars.
    Bar,
    /// Line with markers.
    Line,
    /// Individual points.
    Scatter,
    /// One band of a stacked area plot.
    Area,
}

/// One named series of (x, y) points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    pub points: Vec<[f64; 2]>,
}

/// Declarative description of one chart, consumed by the rendering layer.
/// Built fresh on every recomputation; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Labels for a categorical x axis. When present, series points use the
    /// label's index as their x value.
    pub x_categories: Option<Vec<String>>,
    pub series: Vec<Series>,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Average age rating per genre: a grouped-bar series overlaid with a
/// line+markers trend, both over the same per-genre table. Genre order is
/// alphabetical, matching the aggregator's grouping order.
pub fn genre_rating_chart(agg: &AggregateResult) -> ChartSpec {
    let genres: Vec<String> = agg
        .rating_by_genre
        .iter()
        .map(|(genre, _)| genre.clone())
        .collect();
    let points: Vec<[f64; 2]> = agg
        .rating_by_genre
        .iter()
        .enumerate()
        .map(|(i, (_, mean))| [i as f64, *mean])
        .collect();

    ChartSpec {
        title: "Average age rating by genre".to_string(),
        x_label: "Genre".to_string(),
        y_label: "Average rating".to_string(),
        x_categories: Some(genres),
        series: vec![
            Series {
                name: "Average rating".to_string(),
                kind: SeriesKind::Bar,
                points: points.clone(),
            },
            Series {
                name: "Trend".to_string(),
                kind: SeriesKind::Line,
                points,
            },
        ],
    }
}

/// Critic score vs user score, one point per game of the filtered subset,
/// one series per genre (first-appearance order within the subset). Games
/// missing either score are dropped from this chart only.
pub fn score_scatter_chart(dataset: &GameDataset, indices: &[usize]) -> ChartSpec {
    let mut genre_order: Vec<String> = Vec::new();
    let mut by_genre: Vec<Vec<[f64; 2]>> = Vec::new();

    for &idx in indices {
        let rec = &dataset.records[idx];
        let (Some(critic), Some(user)) = (rec.critic_score, rec.user_score) else {
            continue;
        };
        let pos = match genre_order.iter().position(|g| g == &rec.genre) {
            Some(pos) => pos,
            None => {
                genre_order.push(rec.genre.clone());
                by_genre.push(Vec::new());
                genre_order.len() - 1
            }
        };
        by_genre[pos].push([critic, user]);
    }

    ChartSpec {
        title: "Critic vs user scores by genre".to_string(),
        x_label: "Critic score".to_string(),
        y_label: "User score".to_string(),
        x_categories: None,
        series: genre_order
            .into_iter()
            .zip(by_genre)
            .map(|(genre, points)| Series {
                name: genre,
                kind: SeriesKind::Scatter,
                points,
            })
            .collect(),
    }
}

/// Games released per year, one stacked band per platform (alphabetical).
/// A band has no point for years where the (year, platform) pair is absent;
/// the renderer treats the gap as zero height.
pub fn release_area_chart(agg: &AggregateResult) -> ChartSpec {
    let mut bands: Vec<(String, Vec<[f64; 2]>)> = Vec::new();

    // The count table is keyed (year, platform), so each platform's points
    // arrive in ascending-year order.
    for ((year, platform), count) in &agg.counts_by_year_platform {
        let point = [*year as f64, *count as f64];
        match bands.iter_mut().find(|(name, _)| name == platform) {
            Some((_, points)) => points.push(point),
            None => bands.push((platform.clone(), vec![point])),
        }
    }
    bands.sort_by(|(a, _), (b, _)| a.cmp(b));

    ChartSpec {
        title: "Game releases by year and platform".to_string(),
        x_label: "Year of release".to_string(),
        y_label: "Games released".to_string(),
        x_categories: None,
        series: bands
            .into_iter()
            .map(|(platform, points)| Series {
                name: platform,
                kind: SeriesKind::Area,
                points,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dash::aggregate::aggregate;
    use crate::data::model::{GameDataset, record};

    fn sample() -> GameDataset {
        GameDataset::from_records(vec![
            record("PS4", "Action", 2015, Some(80.0), Some(8.0), Some(15.0)),
            record("PC", "RPG", 2012, Some(70.0), None, Some(12.0)),
            record("PC", "Action", 2012, Some(60.0), Some(6.5), Some(17.0)),
        ])
    }

    #[test]
    fn genre_chart_overlays_bar_and_line_on_shared_axis() {
        let ds = sample();
        let agg = aggregate(&ds, &[0, 1, 2]);
        let spec = genre_rating_chart(&agg);

        assert_eq!(
            spec.x_categories.as_deref(),
            Some(&["Action".to_string(), "RPG".to_string()][..])
        );
        assert_eq!(spec.series.len(), 2);
        assert_eq!(spec.series[0].kind, SeriesKind::Bar);
        assert_eq!(spec.series[1].kind, SeriesKind::Line);
        // Both series share the same x/y data.
        assert_eq!(spec.series[0].points, spec.series[1].points);
        assert_eq!(spec.series[0].points, vec![[0.0, 16.0], [1.0, 12.0]]);
    }

    #[test]
    fn scatter_drops_rows_missing_either_score() {
        let ds = sample();
        let spec = score_scatter_chart(&ds, &[0, 1, 2]);

        // Row 1 has no user score: gone from this chart only.
        let total_points: usize = spec.series.iter().map(|s| s.points.len()).sum();
        assert_eq!(total_points, 2);
        assert!(spec.series.iter().all(|s| s.kind == SeriesKind::Scatter));
        // Genre series in first-appearance order of the subset.
        let names: Vec<_> = spec.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Action"]);
        assert_eq!(spec.series[0].points, vec![[80.0, 8.0], [60.0, 6.5]]);
    }

    #[test]
    fn area_chart_has_one_band_per_platform_with_gaps_omitted() {
        let ds = sample();
        let agg = aggregate(&ds, &[0, 1, 2]);
        let spec = release_area_chart(&agg);

        let names: Vec<_> = spec.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["PC", "PS4"]);
        // PC released two games in 2012 and nothing in 2015: no 2015 point.
        assert_eq!(spec.series[0].points, vec![[2012.0, 2.0]]);
        assert_eq!(spec.series[1].points, vec![[2015.0, 1.0]]);
    }

    #[test]
    fn single_platform_subset_matches_worked_example() {
        let ds = GameDataset::from_records(vec![
            record("PS4", "Action", 2015, Some(80.0), Some(8.0), Some(15.0)),
            record("PC", "RPG", 2012, Some(70.0), None, Some(12.0)),
        ]);
        // Subset filtered to PS4 only.
        let indices = vec![0];
        let agg = aggregate(&ds, &indices);

        let scatter = score_scatter_chart(&ds, &indices);
        let points: usize = scatter.series.iter().map(|s| s.points.len()).sum();
        assert_eq!(points, 1);

        let area = release_area_chart(&agg);
        assert_eq!(area.series.len(), 1);
        assert_eq!(area.series[0].name, "PS4");
        assert_eq!(area.series[0].points, vec![[2015.0, 1.0]]);
    }

    #[test]
    fn empty_subset_builds_empty_charts() {
        let ds = sample();
        let agg = aggregate(&ds, &[]);

        assert!(genre_rating_chart(&agg).series.iter().all(|s| s.points.is_empty()));
        assert!(score_scatter_chart(&ds, &[]).series.is_empty());
        assert!(release_area_chart(&agg).series.is_empty());
    }
}
