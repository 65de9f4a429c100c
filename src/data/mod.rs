/// Data layer: table, ingestion, classification and filtering.
///
/// Architecture:
/// ```text
///       .tsv upload
///            │
///            ▼
///      ┌──────────┐
///      │  loader   │  parse tab-separated text → Table (X/Y validated)
///      └──────────┘
///            │
///            ▼
///      ┌──────────┐
///      │  columns  │  drop excluded prefixes → selectable markers
///      └──────────┘
///            │
///            ▼
///      ┌──────────┐
///      │  marker   │  Numeric(stats) | Categorical(codes)
///      └──────────┘
///            │ numeric only
///            ▼
///      ┌──────────┐
///      │  filter   │  inclusive [min, max] → visible row indices
///      └──────────┘
/// ```

pub mod columns;
pub mod filter;
pub mod loader;
pub mod marker;
pub mod model;
pub mod stats;
