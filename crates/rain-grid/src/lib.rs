//! Gridded dataset loading and bilinear interpolation.
//!
//! This crate reads static numeric datasets (latitude axis, longitude axis,
//! value grid) and turns them into reusable interpolation functions over
//! rectilinear lat/lon grids.
//!
//! # Architecture
//!
//! ```text
//! FieldSpec (lat id, lon id, values id)
//!      │
//!      ▼
//! LazyField::get_or_load(source)      first call only
//!      │
//!      ├─► DatasetSource::load(id) ×3  (file or in-memory)
//!      │
//!      ├─► Grid::new(lats, lons, values)
//!      │         └─► shape / axis validation, descending axes reversed
//!      │
//!      └─► Arc<BilinearInterpolator>  cached in the field
//!               │
//!               ▼
//!          interpolate(lat, lon) / interpolate_points(N×2)
//! ```
//!
//! # Example
//!
//! ```
//! use ndarray::array;
//! use rain_grid::BilinearInterpolator;
//!
//! let interp = BilinearInterpolator::from_axes(
//!     array![0.0, 10.0],
//!     array![0.0, 10.0],
//!     array![[0.0, 10.0], [10.0, 20.0]],
//! )
//! .unwrap();
//!
//! assert_eq!(interp.interpolate(5.0, 5.0), 10.0);
//! assert_eq!(interp.interpolate(-5.0, -5.0), 0.0);
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod grid;
pub mod interpolation;
pub mod loader;
pub mod types;

// Re-export commonly used types at crate root
pub use config::GridConfig;
pub use error::{GridError, Result};
pub use field::{FieldSpec, LazyField};
pub use grid::Grid;
pub use interpolation::{bilinear_weight, locate_cell, BilinearInterpolator, CellPosition};
pub use loader::{parse_dataset, DatasetSource, FileDatasetSource, MemoryDatasetSource};
pub use types::{AxisKind, Dataset, DatasetId};
