/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (job flag kept raw, shown as Yes/No)
///   └──────────┘
///        │
///        ├──────────────► projection   six display cells per row
///        ▼
///   ┌──────────┐
///   │  filter   │  ScoreRange → sub-Dataset, order preserved
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  CategoryKey → frequencies / relation / means / facets
///   └───────────┘
/// ```

pub mod aggregate;
pub mod category;
pub mod filter;
pub mod loader;
pub mod model;
pub mod projection;
