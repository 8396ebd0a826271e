/// Data layer: record types, loading, filtering and derived statistics.
///
/// Architecture:
/// ```text
///  resumen_beneficio_afp.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  sniff delimiter, normalize headers → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  one load per process, shared read-only via Arc
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterParams → FilteredView (row indices)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  metrics  │  counts, box stats, histogram, scatter
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  render   │  on_filters_changed → RenderModel
///   └──────────┘
/// ```

pub mod cache;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod render;
