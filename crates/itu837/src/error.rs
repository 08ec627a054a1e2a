//! Error types for rain statistics queries.

use rain_grid::GridError;
use thiserror::Error;

/// Errors that can occur while selecting a model version or evaluating a query.
#[derive(Error, Debug)]
pub enum ModelError {
    /// The version selector is outside the supported set.
    #[error("version {0} is not implemented for the ITU-R P.837 model (valid: 1-6)")]
    InvalidVersion(u32),

    /// The exceedance percentage is not a finite positive value.
    #[error("exceedance percentage must be finite and positive, got {0}")]
    InvalidPercentage(f64),

    /// Latitude and longitude inputs have incompatible shapes.
    #[error("shape mismatch: latitude {lat}, longitude {lon}")]
    ShapeMismatch { lat: String, lon: String },

    /// Dataset or grid failure.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ModelError {
    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(lat: impl Into<String>, lon: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            lat: lat.into(),
            lon: lon.into(),
        }
    }

    /// Create a DataUnavailable error.
    pub fn data_unavailable(dataset: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Grid(GridError::data_unavailable(dataset, reason))
    }

    /// Whether this error reports a missing or unreadable dataset.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(self, Self::Grid(GridError::DataUnavailable { .. }))
    }

    /// Whether this error reports mismatched shapes, in a query or a grid.
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(
            self,
            Self::ShapeMismatch { .. } | Self::Grid(GridError::ShapeMismatch { .. })
        )
    }
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
