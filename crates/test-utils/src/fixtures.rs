//! Common test fixtures for rain-stats tests.

use ndarray::{array, Array2};

use crate::generators::{
    axis, create_beta_grid, create_mt_grid, create_pr6_grid, lat_meshgrid, lon_meshgrid,
};
use crate::paths::DatasetDir;

/// Dataset identifiers of the P.837-6 ESARAIN reference data.
pub mod esarain {
    pub const LAT: &str = "837/ESARAIN_LAT_v5";
    pub const LON: &str = "837/ESARAIN_LON_v5";
    pub const PR6: &str = "837/ESARAIN_PR6_v5";
    pub const MT: &str = "837/ESARAIN_MT_v5";
    pub const BETA: &str = "837/ESARAIN_BETA_v5";
}

/// The 2x2 grid used for hand-checkable interpolation results.
///
/// lat [0, 10], lon [0, 10], values [[0, 10], [10, 20]]:
/// (5, 5) → 10, (0, 0) → 0, (-5, -5) → 0.
pub mod square {
    use super::*;

    pub fn lats() -> ndarray::Array1<f64> {
        array![0.0, 10.0]
    }

    pub fn lons() -> ndarray::Array1<f64> {
        array![0.0, 10.0]
    }

    pub fn values() -> Array2<f64> {
        array![[0.0, 10.0], [10.0, 20.0]]
    }
}

/// Coarse global ESARAIN-like axes: latitude north to south every 15°,
/// longitude 0 to 360 every 30°.
pub fn coarse_global_axes() -> (Vec<f64>, Vec<f64>) {
    (axis(90.0, -90.0, -15.0), axis(0.0, 360.0, 30.0))
}

/// Write a complete synthetic ESARAIN dataset set (meshgrid axes, Pr6, Mt,
/// Beta) into a fresh temporary directory.
pub fn write_synthetic_esarain() -> anyhow::Result<DatasetDir> {
    let dir = DatasetDir::new();
    let (lats, lons) = coarse_global_axes();

    dir.write(esarain::LAT, &lat_meshgrid(&lats, lons.len()))?;
    dir.write(esarain::LON, &lon_meshgrid(&lons, lats.len()))?;
    dir.write(esarain::PR6, &create_pr6_grid(&lats, &lons))?;
    dir.write(esarain::MT, &create_mt_grid(&lats, &lons))?;
    dir.write(esarain::BETA, &create_beta_grid(&lats, &lons))?;

    Ok(dir)
}
