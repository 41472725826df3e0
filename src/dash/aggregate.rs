use std::collections::BTreeMap;

use crate::data::model::GameDataset;

// ---------------------------------------------------------------------------
// AggregateResult – derived statistics for a filtered subset
// ---------------------------------------------------------------------------

/// Summary statistics and grouped tables computed from a filtered subset.
///
/// Means are `None` when no row carries a value for the field — never `NaN`
/// and never `0.0`, so an empty selection cannot poison a chart axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    /// Number of games in the subset.
    pub total: usize,
    /// Mean user score over non-missing values.
    pub mean_user_score: Option<f64>,
    /// Mean critic score over non-missing values.
    pub mean_critic_score: Option<f64>,
    /// Mean age rating per genre, alphabetical by genre. Genres with no
    /// rows (or no rated rows) in the subset are omitted, not zero-filled.
    pub rating_by_genre: Vec<(String, f64)>,
    /// Game count per (year, platform) pair. Absent pairs are omitted;
    /// the area chart treats them as zero-height.
    pub counts_by_year_platform: BTreeMap<(i32, String), usize>,
}

/// Running mean over optional values.
#[derive(Default)]
struct MeanAcc {
    sum: f64,
    n: usize,
}

impl MeanAcc {
    fn add(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.n += 1;
        }
    }

    fn finish(&self) -> Option<f64> {
        if self.n == 0 {
            None
        } else {
            Some(self.sum / self.n as f64)
        }
    }
}

/// Compute all derived values for the given subset in one pass.
pub fn aggregate(dataset: &GameDataset, indices: &[usize]) -> AggregateResult {
    let mut user_acc = MeanAcc::default();
    let mut critic_acc = MeanAcc::default();
    let mut genre_acc: BTreeMap<String, MeanAcc> = BTreeMap::new();
    let mut counts: BTreeMap<(i32, String), usize> = BTreeMap::new();

    for &idx in indices {
        let rec = &dataset.records[idx];
        user_acc.add(rec.user_score);
        critic_acc.add(rec.critic_score);
        genre_acc
            .entry(rec.genre.clone())
            .or_default()
            .add(rec.rating);
        *counts
            .entry((rec.year, rec.platform.clone()))
            .or_default() += 1;
    }

    // BTreeMap grouping makes the genre order alphabetical, which both
    // series of the genre chart rely on.
    let rating_by_genre = genre_acc
        .iter()
        .filter_map(|(genre, acc)| acc.finish().map(|mean| (genre.clone(), mean)))
        .collect();

    AggregateResult {
        total: indices.len(),
        mean_user_score: user_acc.finish(),
        mean_critic_score: critic_acc.finish(),
        rating_by_genre,
        counts_by_year_platform: counts,
    }
}

/// Round a displayed mean to one decimal digit.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
