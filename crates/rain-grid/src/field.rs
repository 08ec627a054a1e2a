//! Lazily constructed interpolated fields.
//!
//! A field is one physical quantity (e.g. Pr6) stored as a lat axis, a lon
//! axis and a value grid. The interpolator is built on first access from a
//! [`DatasetSource`] and cached for the lifetime of the field.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::grid::Grid;
use crate::interpolation::{BilinearInterpolator, DEFAULT_PARALLEL_THRESHOLD};
use crate::loader::DatasetSource;
use crate::types::{AxisKind, DatasetId};

/// The three datasets that make up one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name used in logs (e.g. "Pr6").
    pub name: String,
    /// Latitude axis dataset.
    pub lat: DatasetId,
    /// Longitude axis dataset.
    pub lon: DatasetId,
    /// Value grid dataset.
    pub values: DatasetId,
}

impl FieldSpec {
    /// Create a field spec.
    pub fn new(
        name: impl Into<String>,
        lat: impl Into<DatasetId>,
        lon: impl Into<DatasetId>,
        values: impl Into<DatasetId>,
    ) -> Self {
        Self {
            name: name.into(),
            lat: lat.into(),
            lon: lon.into(),
            values: values.into(),
        }
    }

    /// Load the datasets and build an interpolator.
    pub fn build(&self, source: &dyn DatasetSource) -> Result<BilinearInterpolator> {
        let values = source.load(&self.values)?;
        let dims = values.shape();
        let lats = source.load(&self.lat)?.into_axis(AxisKind::Latitude, dims)?;
        let lons = source.load(&self.lon)?.into_axis(AxisKind::Longitude, dims)?;

        let grid = Grid::new(lats, lons, values.into_matrix())?;
        let (n_lat, n_lon) = grid.shape();
        debug!(field = %self.name, n_lat, n_lon, "Built interpolator");

        Ok(BilinearInterpolator::new(grid))
    }
}

/// A field whose interpolator is built once and read many times.
#[derive(Debug)]
pub struct LazyField {
    spec: FieldSpec,
    parallel_threshold: usize,
    cell: OnceCell<Arc<BilinearInterpolator>>,
}

impl LazyField {
    /// Create an unloaded field.
    pub fn new(spec: FieldSpec) -> Self {
        Self {
            spec,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            cell: OnceCell::new(),
        }
    }

    /// Set the parallel batch threshold of the interpolator built later.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// The datasets backing this field.
    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    /// Whether the interpolator has been built.
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Get the interpolator, building it from `source` on first use.
    ///
    /// A failed build is not cached; the next call tries again.
    pub fn get_or_load(&self, source: &dyn DatasetSource) -> Result<Arc<BilinearInterpolator>> {
        self.cell
            .get_or_try_init(|| {
                let interp = self
                    .spec
                    .build(source)?
                    .with_parallel_threshold(self.parallel_threshold);
                Ok(Arc::new(interp))
            })
            .cloned()
    }
}
