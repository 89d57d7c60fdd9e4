/// Data layer: core types, loading, filtering and grouping.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file once → Arc<PlayerTable>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  strict per-metric thresholds → new PlayerTable
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  count per sign / element / modality / Venus interval
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sign;
pub mod venus;
