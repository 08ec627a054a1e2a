//! Rectilinear latitude/longitude grids.

use ndarray::{s, Array1, Array2};

use crate::error::{GridError, Result};
use crate::types::AxisKind;

/// A rectilinear grid of scalar values.
///
/// Both axes are strictly increasing and `values[[i, j]]` is the value at
/// `(lats[i], lons[j])`. Grids are immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    lats: Array1<f64>,
    lons: Array1<f64>,
    values: Array2<f64>,
}

impl Grid {
    /// Build a grid from its axes and values.
    ///
    /// Axes may be strictly increasing or strictly decreasing; a decreasing
    /// axis is reversed together with the matching dimension of `values`.
    /// Fails with [`GridError::ShapeMismatch`] if the value dimensions do not
    /// equal `(lats.len(), lons.len())`, and with [`GridError::InvalidAxis`]
    /// for empty, non-finite or non-monotonic axes.
    pub fn new(lats: Array1<f64>, lons: Array1<f64>, values: Array2<f64>) -> Result<Self> {
        let expected = (lats.len(), lons.len());
        if values.dim() != expected {
            return Err(GridError::shape_mismatch(
                format!("{}x{}", expected.0, expected.1),
                format!("{}x{}", values.nrows(), values.ncols()),
            ));
        }

        let mut lats = lats;
        let mut lons = lons;
        let mut values = values;

        if Self::check_axis(&lats, AxisKind::Latitude)? == Direction::Decreasing {
            lats = lats.slice(s![..;-1]).to_owned();
            values = values.slice(s![..;-1, ..]).to_owned();
        }

        if Self::check_axis(&lons, AxisKind::Longitude)? == Direction::Decreasing {
            lons = lons.slice(s![..;-1]).to_owned();
            values = values.slice(s![.., ..;-1]).to_owned();
        }

        Ok(Self { lats, lons, values })
    }

    fn check_axis(axis: &Array1<f64>, kind: AxisKind) -> Result<Direction> {
        if axis.is_empty() {
            return Err(GridError::invalid_axis(format!("{} axis is empty", kind)));
        }

        if let Some(bad) = axis.iter().find(|v| !v.is_finite()) {
            return Err(GridError::invalid_axis(format!(
                "{} axis contains non-finite breakpoint {}",
                kind, bad
            )));
        }

        if axis.len() == 1 {
            return Ok(Direction::Increasing);
        }

        let increasing = axis.windows(2).into_iter().all(|w| w[1] > w[0]);
        if increasing {
            return Ok(Direction::Increasing);
        }

        let decreasing = axis.windows(2).into_iter().all(|w| w[1] < w[0]);
        if decreasing {
            return Ok(Direction::Decreasing);
        }

        Err(GridError::invalid_axis(format!(
            "{} axis is not strictly monotonic",
            kind
        )))
    }

    /// Latitude breakpoints (strictly increasing).
    pub fn lats(&self) -> &Array1<f64> {
        &self.lats
    }

    /// Longitude breakpoints (strictly increasing).
    pub fn lons(&self) -> &Array1<f64> {
        &self.lons
    }

    /// Grid values indexed `[lat_index, lon_index]`.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Grid dimensions as (lat count, lon count).
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Value stored at a grid node.
    pub fn get(&self, lat_index: usize, lon_index: usize) -> Option<f64> {
        self.values.get((lat_index, lon_index)).copied()
    }

    /// Coordinate extent as (min_lat, max_lat, min_lon, max_lon).
    pub fn extent(&self) -> (f64, f64, f64, f64) {
        let n_lat = self.lats.len();
        let n_lon = self.lons.len();
        (
            self.lats[0],
            self.lats[n_lat - 1],
            self.lons[0],
            self.lons[n_lon - 1],
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Increasing,
    Decreasing,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_grid_new() {
        let grid = Grid::new(
            array![0.0, 10.0],
            array![0.0, 10.0, 20.0],
            array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]],
        )
        .unwrap();

        assert_eq!(grid.shape(), (2, 3));
        assert_eq!(grid.get(1, 2), Some(6.0));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.extent(), (0.0, 10.0, 0.0, 20.0));
    }

    #[test]
    fn test_shape_mismatch() {
        let err = Grid::new(
            array![0.0, 10.0],
            array![0.0, 10.0],
            array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]],
        )
        .unwrap_err();

        match err {
            GridError::ShapeMismatch { expected, actual } => {
                assert_eq!(expected, "2x2");
                assert_eq!(actual, "2x3");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_descending_latitude_is_reversed() {
        // Stored north to south, as the ESARAIN files are.
        let grid = Grid::new(
            array![90.0, 0.0, -90.0],
            array![0.0, 180.0],
            array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]],
        )
        .unwrap();

        assert_eq!(grid.lats(), &array![-90.0, 0.0, 90.0]);
        assert_eq!(grid.values(), &array![[5.0, 6.0], [3.0, 4.0], [1.0, 2.0]]);
    }

    #[test]
    fn test_descending_longitude_is_reversed() {
        let grid = Grid::new(
            array![0.0],
            array![20.0, 10.0, 0.0],
            array![[1.0, 2.0, 3.0]],
        )
        .unwrap();

        assert_eq!(grid.lons(), &array![0.0, 10.0, 20.0]);
        assert_eq!(grid.values(), &array![[3.0, 2.0, 1.0]]);
    }

    #[test]
    fn test_invalid_axes() {
        let non_monotonic = Grid::new(
            array![0.0, 10.0, 5.0],
            array![0.0],
            array![[1.0], [2.0], [3.0]],
        );
        assert!(matches!(non_monotonic, Err(GridError::InvalidAxis(_))));

        let repeated = Grid::new(array![0.0, 0.0], array![0.0], array![[1.0], [2.0]]);
        assert!(matches!(repeated, Err(GridError::InvalidAxis(_))));

        let non_finite = Grid::new(array![f64::NAN], array![0.0], array![[1.0]]);
        assert!(matches!(non_finite, Err(GridError::InvalidAxis(_))));

        let empty = Grid::new(Array1::zeros(0), array![0.0], Array2::zeros((0, 1)));
        assert!(matches!(empty, Err(GridError::InvalidAxis(_))));
    }
}
