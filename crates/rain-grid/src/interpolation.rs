//! Bilinear interpolation over rectilinear grids.
//!
//! Points outside the grid are clamped to the nearest edge cell, so every
//! finite query returns a value taken from the grid itself. Interpolating
//! exactly at a breakpoint returns the stored node value.

use ndarray::{Array1, Array2, ArrayView2};
use rayon::prelude::*;

use crate::error::{GridError, Result};
use crate::grid::Grid;

/// Default batch size at which point evaluation switches to rayon.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Position of a query value within an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPosition {
    /// Index of the lower bracketing breakpoint.
    pub lower: usize,
    /// Index of the upper bracketing breakpoint.
    pub upper: usize,
    /// Fractional position between the two breakpoints, in [0, 1].
    pub t: f64,
}

/// Locate the cell of `axis` (strictly increasing) that brackets `value`.
///
/// Values below the first breakpoint clamp to `t = 0` of the first cell,
/// values above the last clamp to `t = 1` of the last cell. A single
/// breakpoint axis always yields `lower == upper == 0`.
pub fn locate_cell(axis: &Array1<f64>, value: f64) -> CellPosition {
    let n = axis.len();
    if n < 2 {
        return CellPosition { lower: 0, upper: 0, t: 0.0 };
    }

    if value <= axis[0] {
        return CellPosition { lower: 0, upper: 1, t: 0.0 };
    }

    if value >= axis[n - 1] {
        return CellPosition { lower: n - 2, upper: n - 1, t: 1.0 };
    }

    // Invariant: axis[lo] <= value < axis[hi]
    let mut lo = 0;
    let mut hi = n - 1;
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if axis[mid] <= value {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    let t = (value - axis[lo]) / (axis[hi] - axis[lo]);
    CellPosition { lower: lo, upper: hi, t }
}

/// Standard bilinear weighting of four corner values.
///
/// `v10` is one step along the first axis from `v00`, `v01` one step along
/// the second.
#[inline]
pub fn bilinear_weight(v00: f64, v10: f64, v01: f64, v11: f64, tx: f64, ty: f64) -> f64 {
    (1.0 - tx) * (1.0 - ty) * v00 + tx * (1.0 - ty) * v10 + (1.0 - tx) * ty * v01 + tx * ty * v11
}

/// A reusable bilinear interpolation function over one [`Grid`].
#[derive(Debug, Clone)]
pub struct BilinearInterpolator {
    grid: Grid,
    parallel_threshold: usize,
}

impl BilinearInterpolator {
    /// Wrap an already validated grid.
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Build an interpolator from raw axes and values.
    ///
    /// Fails with [`GridError::ShapeMismatch`] if the value dimensions do not
    /// match the axes.
    pub fn from_axes(
        lats: Array1<f64>,
        lons: Array1<f64>,
        values: Array2<f64>,
    ) -> Result<Self> {
        Ok(Self::new(Grid::new(lats, lons, values)?))
    }

    /// Set the batch size at which evaluation runs in parallel.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(1);
        self
    }

    /// The underlying grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Interpolate at a single (lat, lon) point.
    ///
    /// Returns NaN if either coordinate is NaN.
    pub fn interpolate(&self, lat: f64, lon: f64) -> f64 {
        if lat.is_nan() || lon.is_nan() {
            return f64::NAN;
        }

        let x = locate_cell(self.grid.lats(), lat);
        let y = locate_cell(self.grid.lons(), lon);
        let values = self.grid.values();

        bilinear_weight(
            values[[x.lower, y.lower]],
            values[[x.upper, y.lower]],
            values[[x.lower, y.upper]],
            values[[x.upper, y.upper]],
            x.t,
            y.t,
        )
    }

    /// Interpolate an `(N, 2)` array of `(lat, lon)` rows.
    pub fn interpolate_points(&self, points: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        if points.ncols() != 2 {
            return Err(GridError::shape_mismatch(
                "(N, 2) query points",
                format!("({}, {})", points.nrows(), points.ncols()),
            ));
        }

        let out: Vec<f64> = if points.nrows() >= self.parallel_threshold {
            let rows: Vec<(f64, f64)> = points.outer_iter().map(|r| (r[0], r[1])).collect();
            rows.par_iter()
                .map(|&(lat, lon)| self.interpolate(lat, lon))
                .collect()
        } else {
            points
                .outer_iter()
                .map(|r| self.interpolate(r[0], r[1]))
                .collect()
        };

        Ok(Array1::from(out))
    }

    /// Interpolate paired latitude and longitude slices of equal length.
    pub fn interpolate_pairs(&self, lats: &[f64], lons: &[f64]) -> Result<Vec<f64>> {
        if lats.len() != lons.len() {
            return Err(GridError::shape_mismatch(
                format!("{} longitudes", lats.len()),
                format!("{} longitudes", lons.len()),
            ));
        }

        if lats.len() >= self.parallel_threshold {
            Ok(lats
                .par_iter()
                .zip(lons.par_iter())
                .map(|(&lat, &lon)| self.interpolate(lat, lon))
                .collect())
        } else {
            Ok(lats
                .iter()
                .zip(lons)
                .map(|(&lat, &lon)| self.interpolate(lat, lon))
                .collect())
        }
    }
}
