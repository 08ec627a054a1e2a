//! Error types for dataset loading and grid interpolation.

use thiserror::Error;

/// Errors that can occur while loading datasets or building grids.
#[derive(Error, Debug)]
pub enum GridError {
    /// The dataset has no backing resource, or the resource could not be parsed.
    #[error("dataset '{dataset}' unavailable: {reason}")]
    DataUnavailable { dataset: String, reason: String },

    /// Grid value dimensions do not match the axis lengths.
    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    /// An axis is empty, non-finite or not strictly monotonic.
    #[error("invalid axis: {0}")]
    InvalidAxis(String),
}

impl GridError {
    /// Create a DataUnavailable error.
    pub fn data_unavailable(dataset: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            dataset: dataset.into(),
            reason: reason.into(),
        }
    }

    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an InvalidAxis error.
    pub fn invalid_axis(msg: impl Into<String>) -> Self {
        Self::InvalidAxis(msg.into())
    }
}

impl From<std::io::Error> for GridError {
    fn from(err: std::io::Error) -> Self {
        Self::DataUnavailable {
            dataset: String::from("<io>"),
            reason: err.to_string(),
        }
    }
}

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
