/// Data layer: discovery, core types and loading.
///
/// Architecture:
/// ```text
///   root directory
///        │
///        ▼
///   ┌──────────┐
///   │   scan    │  walk tree → sorted list of *.csv paths
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Sample> (t, input, output)
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod scan;
