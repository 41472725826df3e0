/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .parquet / .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → GameDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ GameDataset │  Vec<GameRecord>, category indices
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply FilterSpec predicates → filtered indices
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
