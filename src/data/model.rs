use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// GameRecord – one row of the games table
// ---------------------------------------------------------------------------

/// A single game release (one row of the source table).
///
/// Platform, genre, and release year are required; the loader drops source
/// rows that lack them. Scores and the age rating may be missing ("tbd"
/// cells in the original dataset) and stay `None` through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub platform: String,
    pub genre: String,
    /// Year of release.
    pub year: i32,
    /// Critic score (0–100 scale in the source data).
    pub critic_score: Option<f64>,
    /// User score (0–10 scale in the source data).
    pub user_score: Option<f64>,
    /// Numeric age rating.
    pub rating: Option<f64>,
}

// ---------------------------------------------------------------------------
// GameDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed category indices.
///
/// Built once at load time and never mutated afterwards; the app shares it
/// behind an `Arc` between the UI and the dashboard controller.
#[derive(Debug, Clone)]
pub struct GameDataset {
    /// All games (rows), in source order.
    pub records: Vec<GameRecord>,
    /// Sorted set of unique platforms.
    pub platforms: BTreeSet<String>,
    /// Sorted set of unique genres.
    pub genres: BTreeSet<String>,
    /// Smallest release year observed.
    pub year_min: i32,
    /// Largest release year observed.
    pub year_max: i32,
}

impl GameDataset {
    /// Build category indices from the loaded rows.
    pub fn from_records(records: Vec<GameRecord>) -> Self {
        let mut platforms = BTreeSet::new();
        let mut genres = BTreeSet::new();
        let mut year_min = i32::MAX;
        let mut year_max = i32::MIN;

        for rec in &records {
            platforms.insert(rec.platform.clone());
            genres.insert(rec.genre.clone());
            year_min = year_min.min(rec.year);
            year_max = year_max.max(rec.year);
        }

        if records.is_empty() {
            year_min = 0;
            year_max = 0;
        }

        GameDataset {
            records,
            platforms,
            genres,
            year_min,
            year_max,
        }
    }

    /// Number of games.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn record(
    platform: &str,
    genre: &str,
    year: i32,
    critic: Option<f64>,
    user: Option<f64>,
    rating: Option<f64>,
) -> GameRecord {
    GameRecord {
        platform: platform.to_string(),
        genre: genre.to_string(),
        year,
        critic_score: critic,
        user_score: user,
        rating,
    }
}
