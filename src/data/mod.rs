/// Data layer: record model, loading, caching, and filtering.
///
/// Architecture:
/// ```text
///  HousingData.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV, drop rows with NA → HousingTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ DatasetCache  │  one-shot Arc<HousingTable>, never invalidated
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  MEDV ∈ price AND RM ∈ rooms → filtered HousingTable
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
