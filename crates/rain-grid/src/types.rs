//! Core dataset types.

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Identifier of a static dataset resource (e.g. `837/ESARAIN_PR6_v5`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DatasetId(String);

impl DatasetId {
    /// Create a new dataset identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DatasetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DatasetId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for DatasetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which geographic axis a dataset describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisKind {
    /// Latitude varies down the rows of a meshgrid.
    Latitude,
    /// Longitude varies along the columns of a meshgrid.
    Longitude,
}

impl std::fmt::Display for AxisKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Latitude => write!(f, "latitude"),
            Self::Longitude => write!(f, "longitude"),
        }
    }
}

/// A numeric array read from a dataset resource.
///
/// Text resources keep their stored row layout and always load as `Matrix`.
/// An axis file (one row or one column) becomes 1D in [`Dataset::into_axis`],
/// where the value grid's dimensions decide how it is read.
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    /// A 1D array supplied in memory.
    Vector(Array1<f64>),
    /// A 2D matrix, rows as stored in the resource.
    Matrix(Array2<f64>),
}

impl Dataset {
    /// Shape of the underlying array as (rows, cols).
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Self::Vector(v) => (1, v.len()),
            Self::Matrix(m) => m.dim(),
        }
    }

    /// True for vectors and for single-row or single-column matrices.
    pub fn is_one_dimensional(&self) -> bool {
        match self {
            Self::Vector(_) => true,
            Self::Matrix(m) => m.nrows() == 1 || m.ncols() == 1,
        }
    }

    /// Extract a 1D axis for a value grid of `dims` = (n_lat, n_lon).
    ///
    /// A matrix with exactly the grid's dimensions is a meshgrid: the latitude
    /// axis is its first column, the longitude axis its first row. Otherwise a
    /// single row or column is the axis itself, and vectors pass through.
    pub fn into_axis(self, kind: AxisKind, dims: (usize, usize)) -> Result<Array1<f64>> {
        let m = match self {
            Self::Vector(v) => return Ok(v),
            Self::Matrix(m) => m,
        };
        if m.is_empty() {
            return Err(GridError::invalid_axis(format!("empty {} dataset", kind)));
        }

        if m.dim() == dims {
            return Ok(match kind {
                AxisKind::Latitude => m.column(0).to_owned(),
                AxisKind::Longitude => m.row(0).to_owned(),
            });
        }
        match m.dim() {
            (1, _) => Ok(m.row(0).to_owned()),
            (_, 1) => Ok(m.column(0).to_owned()),
            (rows, cols) => Err(GridError::shape_mismatch(
                format!("{}x{} {} meshgrid", dims.0, dims.1, kind),
                format!("{}x{}", rows, cols),
            )),
        }
    }

    /// Extract a 2D value grid. A vector becomes a single-row matrix.
    pub fn into_matrix(self) -> Array2<f64> {
        match self {
            Self::Matrix(m) => m,
            Self::Vector(v) => v.insert_axis(Axis(0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_meshgrid_axis_extraction() {
        let lats = Dataset::Matrix(array![[10.0, 10.0, 10.0], [0.0, 0.0, 0.0]]);
        let lons = Dataset::Matrix(array![[0.0, 1.5, 3.0], [0.0, 1.5, 3.0]]);

        assert_eq!(lats.into_axis(AxisKind::Latitude, (2, 3)).unwrap(), array![10.0, 0.0]);
        assert_eq!(
            lons.into_axis(AxisKind::Longitude, (2, 3)).unwrap(),
            array![0.0, 1.5, 3.0]
        );
    }

    #[test]
    fn test_vector_axis_passthrough() {
        let axis = Dataset::Vector(array![-90.0, 0.0, 90.0]);
        assert_eq!(axis.shape(), (1, 3));
        assert!(axis.is_one_dimensional());
        assert_eq!(
            axis.into_axis(AxisKind::Latitude, (3, 4)).unwrap(),
            array![-90.0, 0.0, 90.0]
        );
    }

    #[test]
    fn test_single_column_axis() {
        let axis = Dataset::Matrix(array![[1.0], [2.0], [3.0]]);
        assert!(axis.is_one_dimensional());
        assert_eq!(
            axis.into_axis(AxisKind::Longitude, (2, 3)).unwrap(),
            array![1.0, 2.0, 3.0]
        );
    }

    #[test]
    fn test_single_latitude_row_meshgrid() {
        // One latitude row: the lat meshgrid repeats it across every column.
        let lats = Dataset::Matrix(array![[45.0, 45.0, 45.0]]);
        let lons = Dataset::Matrix(array![[0.0, 10.0, 20.0]]);

        assert_eq!(lats.into_axis(AxisKind::Latitude, (1, 3)).unwrap(), array![45.0]);
        assert_eq!(
            lons.into_axis(AxisKind::Longitude, (1, 3)).unwrap(),
            array![0.0, 10.0, 20.0]
        );
    }

    #[test]
    fn test_single_longitude_column_meshgrid() {
        let lats = Dataset::Matrix(array![[0.0], [10.0], [20.0]]);
        let lons = Dataset::Matrix(array![[5.0], [5.0], [5.0]]);

        assert_eq!(
            lats.into_axis(AxisKind::Latitude, (3, 1)).unwrap(),
            array![0.0, 10.0, 20.0]
        );
        assert_eq!(lons.into_axis(AxisKind::Longitude, (3, 1)).unwrap(), array![5.0]);
    }

    #[test]
    fn test_meshgrid_with_wrong_dims() {
        let lats = Dataset::Matrix(array![[1.0, 1.0], [2.0, 2.0]]);
        assert!(!lats.is_one_dimensional());
        assert!(matches!(
            lats.into_axis(AxisKind::Latitude, (2, 3)),
            Err(GridError::ShapeMismatch { .. })
        ));

        let empty = Dataset::Matrix(Array2::zeros((0, 0)));
        assert!(matches!(
            empty.into_axis(AxisKind::Longitude, (2, 3)),
            Err(GridError::InvalidAxis(_))
        ));
    }

    #[test]
    fn test_vector_into_matrix() {
        let m = Dataset::Vector(array![1.0, 2.0]).into_matrix();
        assert_eq!(m, array![[1.0, 2.0]]);
    }

    #[test]
    fn test_dataset_id_display() {
        let id = DatasetId::from("837/ESARAIN_PR6_v5");
        assert_eq!(id.to_string(), "837/ESARAIN_PR6_v5");
        assert_eq!(id.as_str(), "837/ESARAIN_PR6_v5");
    }
}
