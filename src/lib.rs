//! Layoffs dashboard data layer.
//!
//! Loads a layoff-events dataset once per session, cleans it, and builds
//! the derived tables and declarative chart specifications for each panel
//! of the dashboard page. Drawing is left to whatever consumes the
//! serialized [`Dashboard`].

pub mod config;
pub mod dashboard;
pub mod data;
pub mod session;
pub mod views;

pub use config::{ConfigError, DashboardConfig};
pub use dashboard::{Dashboard, Panel};
pub use data::filter::{CountryFilter, FilterError, FilterSelection};
pub use data::loader::{load_file, LoadError};
pub use data::model::{CanonicalDataset, Cell, LayoffRecord, RawRecord};
pub use session::{DatasetCache, Session, SourceSignature};
pub use views::DerivedView;
