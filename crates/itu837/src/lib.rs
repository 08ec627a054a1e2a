//! ITU-R P.837 rain statistics.
//!
//! Computes the percentage probability of rain in an average year (P0) and
//! the rainfall rate exceeded for a given percentage of the year (Rp) at any
//! location, from gridded climatological fields interpolated bilinearly.
//!
//! # Architecture
//!
//! ```text
//! RainService::rain_percentage_probability(lat, lon)
//!      │
//!      ├─► PreparedQuery        shape normalization, lon wrapped to [0, 360)
//!      │
//!      ├─► QueryCache           keyed on (version, op, points)
//!      │
//!      └─► VersionRegistry::active()
//!               │
//!               ▼
//!          RainModel::V1..V6    enum dispatch over RainStatistics
//!               │
//!               ▼
//!          FieldModel           Pr6 / Mt / Beta LazyFields
//!               │
//!               └─► formula::{probability_of_rain, rainfall_rate}
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use itu837::{RainService, VersionRegistry};
//! use rain_grid::MemoryDatasetSource;
//!
//! let registry = VersionRegistry::new(Arc::new(MemoryDatasetSource::new()));
//! let service = RainService::new(Arc::new(registry));
//!
//! assert_eq!(service.get_version(), 6);
//! service.change_version(5).unwrap();
//! assert_eq!(service.get_version(), 5);
//! assert!(service.change_version(7).is_err());
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod formula;
pub mod model;
pub mod profile;
pub mod registry;
pub mod service;
pub mod units;
pub mod values;
pub mod version;

// Re-export commonly used types at crate root
pub use cache::{CacheStats, QueryCache, QueryKey, QueryOp};
pub use config::ServiceConfig;
pub use error::{ModelError, Result};
pub use model::{FieldModel, RainModel, RainStatistics};
pub use profile::{FormulaConstants, VersionProfile};
pub use registry::VersionRegistry;
pub use service::RainService;
pub use units::{Quantity, Unit};
pub use values::{wrap_longitude, OutputShape, PreparedQuery, Values, ValuesKind};
pub use version::{ModelVersion, VersionInfo, VersionStatus};
