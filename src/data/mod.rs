/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ClimateDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ ClimateDataset │  Vec<Record>, country index, year extent
///   └───────────────┘
///        │
///        ▼
///   pipeline::build_chart_data  (per-scenario series + crossing markers)
/// ```
pub mod loader;
pub mod model;
