/// Data layer: core types, loading, and outcome partitioning.
///
/// Architecture:
/// ```text
///   Titanic-clean.csv + Schema
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows, transpose, convert → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │    Table      │  (ColumnKey, Column) in schema order
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  outcome column → died / survived row indices
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
