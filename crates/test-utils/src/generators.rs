//! Test data generators for synthetic rain climatology fields.
//!
//! These generators create smooth, physically plausible patterns (wet
//! tropics, dry poles) so that model outputs can be checked for range and
//! monotonicity without the real reference datasets.

use ndarray::Array2;

/// Inclusive, evenly spaced axis from `start` to `stop`.
///
/// `step` may be negative for a descending axis.
///
/// # Example
///
/// ```
/// use test_utils::axis;
///
/// assert_eq!(axis(0.0, 10.0, 5.0), vec![0.0, 5.0, 10.0]);
/// assert_eq!(axis(90.0, -90.0, -90.0), vec![90.0, 0.0, -90.0]);
/// ```
pub fn axis(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let n = ((stop - start) / step).round() as usize + 1;
    (0..n).map(|i| start + i as f64 * step).collect()
}

/// Latitude meshgrid: each row is constant, one row per latitude.
pub fn lat_meshgrid(lats: &[f64], n_lon: usize) -> Array2<f64> {
    Array2::from_shape_fn((lats.len(), n_lon), |(i, _)| lats[i])
}

/// Longitude meshgrid: each column is constant, one column per longitude.
pub fn lon_meshgrid(lons: &[f64], n_lat: usize) -> Array2<f64> {
    Array2::from_shape_fn((n_lat, lons.len()), |(_, j)| lons[j])
}

/// A grid filled with a single value.
pub fn create_constant_grid(n_lat: usize, n_lon: usize, value: f64) -> Array2<f64> {
    Array2::from_elem((n_lat, n_lon), value)
}

/// Pr6-like field in percent.
///
/// Peaks at 8% on the equator and is exactly zero poleward of 75°.
pub fn create_pr6_grid(lats: &[f64], lons: &[f64]) -> Array2<f64> {
    Array2::from_shape_fn((lats.len(), lons.len()), |(i, _)| {
        let lat = lats[i];
        if lat.abs() >= 75.0 {
            0.0
        } else {
            8.0 * lat.to_radians().cos().powi(2)
        }
    })
}

/// Mt-like field: mean annual rainfall in mm, 200 to ~3000.
pub fn create_mt_grid(lats: &[f64], lons: &[f64]) -> Array2<f64> {
    Array2::from_shape_fn((lats.len(), lons.len()), |(i, j)| {
        let wet = lats[i].to_radians().cos().powi(2);
        let zonal = 1.0 + 0.2 * lons[j].to_radians().sin();
        200.0 + 2500.0 * wet * zonal
    })
}

/// Beta-like field: convective fraction between 0.1 and 0.7.
pub fn create_beta_grid(lats: &[f64], lons: &[f64]) -> Array2<f64> {
    Array2::from_shape_fn((lats.len(), lons.len()), |(i, _)| {
        0.1 + 0.6 * lats[i].to_radians().cos().powi(2)
    })
}

/// Render a matrix in the whitespace-separated dataset text format.
pub fn format_dataset(values: &Array2<f64>) -> String {
    let mut out = String::new();
    for row in values.rows() {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_ascending_and_descending() {
        assert_eq!(axis(0.0, 360.0, 90.0), vec![0.0, 90.0, 180.0, 270.0, 360.0]);
        assert_eq!(axis(90.0, -90.0, -45.0).len(), 5);
    }

    #[test]
    fn test_meshgrids() {
        let lat = lat_meshgrid(&[10.0, 0.0], 3);
        assert_eq!(lat.dim(), (2, 3));
        assert_eq!(lat[[1, 2]], 0.0);

        let lon = lon_meshgrid(&[0.0, 5.0, 10.0], 2);
        assert_eq!(lon.dim(), (2, 3));
        assert_eq!(lon[[1, 2]], 10.0);
    }

    #[test]
    fn test_pr6_zero_at_poles() {
        let lats = axis(-90.0, 90.0, 15.0);
        let lons = axis(0.0, 330.0, 30.0);
        let pr6 = create_pr6_grid(&lats, &lons);

        assert_eq!(pr6[[0, 0]], 0.0);
        assert_eq!(pr6[[lats.len() - 1, 0]], 0.0);
        assert!((pr6[[6, 0]] - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_beta_range() {
        let lats = axis(-90.0, 90.0, 15.0);
        let beta = create_beta_grid(&lats, &[0.0]);
        assert!(beta.iter().all(|&b| (0.1 - 1e-12..=0.7 + 1e-12).contains(&b)));
    }

    #[test]
    fn test_format_dataset() {
        let text = format_dataset(&create_constant_grid(2, 3, 1.5));
        assert_eq!(text, "1.5 1.5 1.5\n1.5 1.5 1.5\n");
    }
}
