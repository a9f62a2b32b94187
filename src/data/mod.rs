/// Data layer: parsing, exclusion, storage, selection and aggregation.
///
/// Architecture:
/// ```text
///   two-column .txt (mass, event)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse bytes → Vec<Record>  (or FormatError)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ exclusion  │  drop the 2 rows after each trigger label → Dataset
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  store    │  name → Dataset, last write wins
///   └──────────┘
///        │  (every parameter change)
///        ▼
///   ┌──────────┐
///   │  filter   │  event labels + axis bounds → masses per dataset / union
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ histogram  │  BinTable + StatsSummary
///   └───────────┘
/// ```

pub mod exclusion;
pub mod export;
pub mod filter;
pub mod histogram;
pub mod loader;
pub mod model;
pub mod store;
