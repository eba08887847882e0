//! Regular latitude/longitude grid helpers: decimation, meshgrid, cell areas.

use crate::errors::{OceanDiagError, Result};
use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2, Axis};
use std::f64::consts::PI;

/// Mean Earth radius in metres.
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Angular spacing of the NOGAPS wind grid in degrees.
pub const NOGAPS_SPACING_DEG: f64 = 0.3125;

/// Rows and columns of the NOGAPS wind grid.
pub const NOGAPS_SHAPE: (usize, usize) = (576, 1152);

/// Keep every `stride`-th row and column, starting at index 0.
///
/// The result has `ceil(rows / stride)` rows and `ceil(cols / stride)`
/// columns; trailing remainders are dropped, nothing is interpolated.
pub fn decimate(field: ArrayView2<'_, f64>, stride: usize) -> Result<Array2<f64>> {
    if stride == 0 {
        return Err(OceanDiagError::InvalidParameter {
            message: "decimation stride must be at least 1".to_string(),
        });
    }
    let step = stride as isize;
    Ok(field.slice(s![..;step, ..;step]).to_owned())
}

/// Expand coordinate vectors into `[lats.len(), lons.len()]` grids.
pub fn meshgrid(lons: ArrayView1<'_, f64>, lats: ArrayView1<'_, f64>) -> (Array2<f64>, Array2<f64>) {
    let shape = (lats.len(), lons.len());
    let x = Array2::from_shape_fn(shape, |(_, j)| lons[j]);
    let y = Array2::from_shape_fn(shape, |(i, _)| lats[i]);
    (x, y)
}

/// Values `start, start + step, …` strictly below `stop`.
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if step.is_nan() || step <= 0.0 || !start.is_finite() || !stop.is_finite() {
        return vec![];
    }
    let n = ((stop - start) / step).ceil().max(0.0) as usize;
    (0..n).map(|k| start + k as f64 * step).collect()
}

/// Arc length spanned by `spacing_deg` of a great circle of `radius`.
pub fn grid_spacing_distance(spacing_deg: f64, radius: f64) -> f64 {
    2.0 * PI * radius * spacing_deg / 360.0
}

/// Area of each grid cell on a regular equirectangular grid.
///
/// `area[row, col] = dy² · cos(lat[row])`; identical along a row.
pub fn cell_area(lats: ArrayView1<'_, f64>, n_cols: usize, spacing_deg: f64) -> Result<Array2<f64>> {
    if spacing_deg.is_nan() || spacing_deg <= 0.0 {
        return Err(OceanDiagError::InvalidParameter {
            message: format!("grid spacing must be positive, got {}", spacing_deg),
        });
    }
    let dy = grid_spacing_distance(spacing_deg, EARTH_RADIUS);
    let row_area: Array1<f64> = lats.mapv(|lat| dy * dy * lat.to_radians().cos());

    let mut area = Array2::<f64>::zeros((lats.len(), n_cols));
    area.assign(&row_area.insert_axis(Axis(1)));
    Ok(area)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, Array};

    fn nogaps_lats() -> Array1<f64> {
        Array::range(0.0, NOGAPS_SHAPE.0 as f64, 1.0).mapv(|i| -90.0 + i * NOGAPS_SPACING_DEG)
    }

    #[test]
    fn test_decimate_shape_and_values() {
        let field = Array2::from_shape_fn((10, 17), |(i, j)| (i * 100 + j) as f64);
        let dec = decimate(field.view(), 8).unwrap();
        assert_eq!(dec.dim(), (2, 3));
        for ((i, j), value) in dec.indexed_iter() {
            assert_eq!(*value, field[[i * 8, j * 8]]);
        }
    }

    #[test]
    fn test_arange_excludes_stop() {
        assert_eq!(arange(0.0, 360.0, 50.0), vec![0.0, 50.0, 100.0, 150.0, 200.0, 250.0, 300.0, 350.0]);
        assert_eq!(arange(-90.0, 90.0, 30.0), vec![-90.0, -60.0, -30.0, 0.0, 30.0, 60.0]);
        assert!(arange(0.0, 1.0, 0.0).is_empty());
    }

    #[test]
    fn test_decimate_nogaps_grid() {
        let field = Array2::<f64>::zeros(NOGAPS_SHAPE);
        let dec = decimate(field.view(), 8).unwrap();
        assert_eq!(dec.dim(), (72, 144));
    }

    #[test]
    fn test_decimate_rejects_zero_stride() {
        let field = Array2::<f64>::zeros((2, 2));
        assert!(matches!(
            decimate(field.view(), 0),
            Err(OceanDiagError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_meshgrid() {
        let (x, y) = meshgrid(arr1(&[0.0, 10.0, 20.0]).view(), arr1(&[-5.0, 5.0]).view());
        assert_eq!(x.dim(), (2, 3));
        assert_eq!(x[[1, 2]], 20.0);
        assert_eq!(y[[1, 2]], 5.0);
        assert_eq!(y[[0, 0]], -5.0);
    }

    #[test]
    fn test_cell_area_equator_and_poles() {
        let lats = nogaps_lats();
        let area = cell_area(lats.view(), NOGAPS_SHAPE.1, NOGAPS_SPACING_DEG).unwrap();
        assert_eq!(area.dim(), NOGAPS_SHAPE);

        let dy = grid_spacing_distance(NOGAPS_SPACING_DEG, EARTH_RADIUS);
        assert_eq!(lats[288], 0.0);
        assert_eq!(area[[288, 0]], dy * dy);
        assert_eq!(area[[288, 1151]], dy * dy);
        assert!(area[[0, 0]].abs() < 1e-6);
    }

    #[test]
    fn test_cell_area_decreases_toward_poles() {
        let lats = nogaps_lats();
        let area = cell_area(lats.view(), 4, NOGAPS_SPACING_DEG).unwrap();
        assert!(area.iter().all(|&a| a >= 0.0));
        for row in 1..=288 {
            assert!(area[[row, 0]] > area[[row - 1, 0]]);
        }
        for row in 289..NOGAPS_SHAPE.0 {
            assert!(area[[row, 0]] < area[[row - 1, 0]]);
        }
    }

    #[test]
    fn test_cell_area_rejects_bad_spacing() {
        let lats = arr1(&[0.0]);
        assert!(cell_area(lats.view(), 1, 0.0).is_err());
        assert!(cell_area(lats.view(), 1, f64::NAN).is_err());
    }
}
