//! Data layer: core types, loading, cleaning, and filtering.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Vec<RawRecord>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  clean    │  mean-fill, parse dates, normalize countries
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────────┐
//!   │ CanonicalDataset │  Vec<LayoffRecord>, industry index
//!   └──────────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  sidebar selection → matching record indices
//!   └──────────┘
//! ```

pub mod clean;
pub mod filter;
pub mod loader;
pub mod model;
