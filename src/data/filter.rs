use std::collections::BTreeSet;

use thiserror::Error;

use super::model::GameDataset;

// ---------------------------------------------------------------------------
// FilterSpec: which platforms / genres / years are selected
// ---------------------------------------------------------------------------

/// The current set of user-selected filter predicates.
///
/// An empty `platforms` or `genres` set means "match nothing" — the UI
/// initialises both to the full unique-value sets via [`FilterSpec::select_all`],
/// so "everything deselected" and "everything selected" are distinct states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub platforms: BTreeSet<String>,
    pub genres: BTreeSet<String>,
    /// Inclusive release-year range `(min, max)`.
    pub years: (i32, i32),
}

/// A control tuple that cannot become a valid filter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("invalid year range: {min} > {max}")]
    InvalidRange { min: i32, max: i32 },
}

impl FilterSpec {
    /// Initialise a spec with every platform and genre selected and the
    /// full observed year range (i.e., show everything).
    pub fn select_all(dataset: &GameDataset) -> Self {
        FilterSpec {
            platforms: dataset.platforms.clone(),
            genres: dataset.genres.clone(),
            years: (dataset.year_min, dataset.year_max),
        }
    }

    /// Reject a range with min > max before it reaches the filter.
    pub fn validate(&self) -> Result<(), FilterError> {
        let (min, max) = self.years;
        if min > max {
            return Err(FilterError::InvalidRange { min, max });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return indices of games that pass all three predicates, in source order.
///
/// A game passes when its platform is selected AND its genre is selected AND
/// its release year lies in the inclusive range. An empty selected-set makes
/// the whole result empty. A range wider than the observed years is harmless.
pub fn filter_indices(dataset: &GameDataset, spec: &FilterSpec) -> Vec<usize> {
    if spec.platforms.is_empty() || spec.genres.is_empty() {
        // Nothing selected in some dimension → hide everything
        return Vec::new();
    }
    let (min, max) = spec.years;

    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            spec.platforms.contains(&rec.platform)
                && spec.genres.contains(&rec.genre)
                && rec.year >= min
                && rec.year <= max
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn sample() -> GameDataset {
        GameDataset::from_records(vec![
            record("PS4", "Action", 2015, Some(80.0), Some(8.0), Some(15.0)),
            record("PC", "RPG", 2012, Some(70.0), None, Some(12.0)),
            record("PC", "Action", 2008, None, Some(7.5), Some(18.0)),
            record("X360", "Sports", 2010, Some(60.0), Some(6.0), Some(3.0)),
        ])
    }

    fn set(vals: &[&str]) -> BTreeSet<String> {
        vals.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn select_all_matches_every_row() {
        let ds = sample();
        let spec = FilterSpec::select_all(&ds);
        assert!(spec.validate().is_ok());
        assert_eq!(filter_indices(&ds, &spec), vec![0, 1, 2, 3]);
    }

    #[test]
    fn all_predicates_hold_and_no_qualifying_row_is_dropped() {
        let ds = sample();
        let spec = FilterSpec {
            platforms: set(&["PC", "PS4"]),
            genres: set(&["Action", "RPG"]),
            years: (2010, 2016),
        };
        let idx = filter_indices(&ds, &spec);
        assert_eq!(idx, vec![0, 1]);
        for &i in &idx {
            let rec = &ds.records[i];
            assert!(spec.platforms.contains(&rec.platform));
            assert!(spec.genres.contains(&rec.genre));
            assert!(rec.year >= 2010 && rec.year <= 2016);
        }
        // Maximality: every excluded row fails at least one predicate.
        for (i, rec) in ds.records.iter().enumerate() {
            if !idx.contains(&i) {
                assert!(
                    !spec.platforms.contains(&rec.platform)
                        || !spec.genres.contains(&rec.genre)
                        || rec.year < 2010
                        || rec.year > 2016
                );
            }
        }
    }

    #[test]
    fn empty_selection_matches_nothing_regardless_of_years() {
        let ds = sample();
        let no_platforms = FilterSpec {
            platforms: BTreeSet::new(),
            genres: set(&["Action", "RPG", "Sports"]),
            years: (1990, 2020),
        };
        assert!(filter_indices(&ds, &no_platforms).is_empty());

        let no_genres = FilterSpec {
            platforms: set(&["PC", "PS4", "X360"]),
            genres: BTreeSet::new(),
            years: (1990, 2020),
        };
        assert!(filter_indices(&ds, &no_genres).is_empty());
    }

    #[test]
    fn year_range_is_inclusive_on_both_ends() {
        let ds = sample();
        let spec = FilterSpec {
            platforms: set(&["PC", "PS4", "X360"]),
            genres: set(&["Action", "RPG", "Sports"]),
            years: (2010, 2012),
        };
        assert_eq!(filter_indices(&ds, &spec), vec![1, 3]);
    }

    #[test]
    fn range_wider_than_observed_years_is_harmless() {
        let ds = sample();
        let mut spec = FilterSpec::select_all(&ds);
        spec.years = (1900, 3000);
        assert_eq!(filter_indices(&ds, &spec).len(), ds.len());
    }

    #[test]
    fn inverted_range_is_rejected_by_validate() {
        let ds = sample();
        let mut spec = FilterSpec::select_all(&ds);
        spec.years = (2016, 2010);
        assert_eq!(
            spec.validate(),
            Err(FilterError::InvalidRange {
                min: 2016,
                max: 2010
            })
        );
    }
}
