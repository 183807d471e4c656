/// Data layer: core types, loading, and sampling.
///
/// Architecture:
/// ```text
///  dados.csv (x,y rows)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (bad rows dropped)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  paired x / y columns
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  sampler  │  seeded subset, sorted by x → Sample
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod sampler;
