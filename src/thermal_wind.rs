//! Geostrophic thermal wind from a hydrographic density section
//!
//! The meridional shear at a target longitude comes from a centered
//! difference of density between the two neighbouring stations, and the
//! velocity profile follows by integrating the shear upward from a
//! no-motion level at the deepest valid sample.
//!
//! The integrated velocity is relative to the (unknown) bottom velocity: the
//! barotropic part of the flow cannot be recovered from shear alone.

use crate::errors::{OceanDiagError, Result};
use crate::grid::EARTH_RADIUS;
use ndarray::{Array1, ArrayView1, ArrayView2, Axis, Zip};
use std::f64::consts::PI;

/// Length of the sidereal day in seconds.
pub const SIDEREAL_DAY: f64 = 86164.0;

/// Gravitational acceleration used for the IGY section (m/s²).
pub const GRAVITY: f64 = 9.8;

/// Average seawater density (kg/m³).
pub const REFERENCE_DENSITY: f64 = 1035.0;

/// Tolerance when matching a coordinate value on an axis.
pub const COORDINATE_TOLERANCE: f64 = 1e-6;

/// Coriolis parameter `f = 2Ω sin(φ)` in 1/s.
pub fn coriolis_parameter(latitude_deg: f64) -> f64 {
    2.0 * (2.0 * PI / SIDEREAL_DAY) * latitude_deg.to_radians().sin()
}

/// Physical constants of the thermal-wind balance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalWindConfig {
    /// Latitude of the section in degrees
    pub latitude: f64,
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
    /// Reference density (kg/m³)
    pub rho0: f64,
    /// Earth radius (m)
    pub earth_radius: f64,
}

impl Default for ThermalWindConfig {
    fn default() -> Self {
        Self {
            latitude: 24.0,
            gravity: GRAVITY,
            rho0: REFERENCE_DENSITY,
            earth_radius: EARTH_RADIUS,
        }
    }
}

impl ThermalWindConfig {
    pub fn coriolis(&self) -> f64 {
        coriolis_parameter(self.latitude)
    }

    /// Zonal distance covered by `delta_lon_deg` at the section latitude.
    pub fn zonal_distance(&self, delta_lon_deg: f64) -> f64 {
        2.0 * PI * self.earth_radius * (delta_lon_deg / 360.0) * self.latitude.to_radians().cos()
    }
}

/// First index whose value matches `value` within [`COORDINATE_TOLERANCE`].
pub fn find_coordinate_index(axis: ArrayView1<'_, f64>, axis_name: &str, value: f64) -> Result<usize> {
    axis.iter()
        .position(|&x| (x - value).abs() <= COORDINATE_TOLERANCE)
        .ok_or_else(|| OceanDiagError::CoordinateNotFound {
            axis: axis_name.to_string(),
            value,
        })
}

/// Vertical shear `dv/dz` at column `index` of `density[level, position]`.
///
/// Uses the centered difference between columns `index - 1` and
/// `index + 1`. A NaN in either flanking column gives NaN at that level.
pub fn thermal_wind_shear(
    density: ArrayView2<'_, f64>,
    positions: ArrayView1<'_, f64>,
    index: usize,
    config: &ThermalWindConfig,
) -> Result<Array1<f64>> {
    let n_positions = density.ncols();
    if positions.len() != n_positions {
        return Err(OceanDiagError::ShapeMismatch {
            message: format!(
                "section has {} columns but {} longitudes",
                n_positions,
                positions.len()
            ),
        });
    }
    if index == 0 || index + 1 >= n_positions {
        return Err(OceanDiagError::IndexOutOfRange {
            index,
            len: n_positions,
        });
    }

    let delta_lon = positions[index + 1] - positions[index - 1];
    let delta_x = config.zonal_distance(delta_lon);
    let factor = -(config.gravity / (config.coriolis() * config.rho0));
    tracing::debug!(index, delta_lon, delta_x, factor, "thermal wind centered difference");

    let west = density.index_axis(Axis(1), index - 1);
    let east = density.index_axis(Axis(1), index + 1);
    Ok(Zip::from(&east)
        .and(&west)
        .map_collect(|&e, &w| factor * (e - w) / delta_x))
}

/// Number of non-missing shear values.
pub fn count_valid(values: ArrayView1<'_, f64>) -> usize {
    values.iter().filter(|v| !v.is_nan()).count()
}

/// Integrate shear upward from `v = 0` at the deepest valid level.
///
/// Returns `count_valid(dvdz)` samples with `v[L-1] = 0` and
/// `v[n] = v[n+1] + dvdz[n]·dz` for `n = L-2 … 0`.
pub fn integrate_velocity(dvdz: ArrayView1<'_, f64>, dz: f64) -> Array1<f64> {
    let length_good = count_valid(dvdz);
    let mut v = Array1::<f64>::zeros(length_good);
    for n in (0..length_good.saturating_sub(1)).rev() {
        v[n] = v[n + 1] + dvdz[n] * dz;
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    fn config() -> ThermalWindConfig {
        ThermalWindConfig::default()
    }

    #[test]
    fn test_coriolis_at_24n() {
        let f = coriolis_parameter(24.0);
        assert!((f - 5.9318e-5).abs() < 1e-8);
        assert_eq!(coriolis_parameter(0.0), 0.0);
        assert!(coriolis_parameter(-24.0) < 0.0);
    }

    #[test]
    fn test_find_coordinate_index() {
        let xax = arr1(&[-42.0, -41.0, -40.0, -39.0]);
        assert_eq!(find_coordinate_index(xax.view(), "xax", -40.0).unwrap(), 2);
        assert!(matches!(
            find_coordinate_index(xax.view(), "xax", -40.5),
            Err(OceanDiagError::CoordinateNotFound { .. })
        ));
    }

    #[test]
    fn test_shear_formula() {
        let cfg = config();
        let xax = arr1(&[-41.0, -40.0, -39.0]);
        let zz = arr2(&[[26.0, 26.5, 27.0], [27.5, 27.5, 27.5]]);
        let dvdz = thermal_wind_shear(zz.view(), xax.view(), 1, &cfg).unwrap();

        let dx = 2.0 * PI * EARTH_RADIUS * (2.0 / 360.0) * 24f64.to_radians().cos();
        let expected = -(9.8 / (cfg.coriolis() * 1035.0)) * 1.0 / dx;
        assert!((dvdz[0] - expected).abs() < 1e-12 * expected.abs());
        assert_eq!(dvdz[1], 0.0);
    }

    #[test]
    fn test_shear_antisymmetric() {
        let cfg = config();
        let xax = arr1(&[-41.0, -40.0, -39.0]);
        let forward = arr2(&[[26.0, 0.0, 27.0]]);
        let reverse = arr2(&[[27.0, 0.0, 26.0]]);
        let a = thermal_wind_shear(forward.view(), xax.view(), 1, &cfg).unwrap();
        let b = thermal_wind_shear(reverse.view(), xax.view(), 1, &cfg).unwrap();
        assert_eq!(a[0], -b[0]);
    }

    #[test]
    fn test_shear_nan_propagates() {
        let cfg = config();
        let xax = arr1(&[-41.0, -40.0, -39.0]);
        let zz = arr2(&[[26.0, 26.0, 27.0], [f64::NAN, 27.8, 27.9], [27.9, 28.0, f64::NAN]]);
        let dvdz = thermal_wind_shear(zz.view(), xax.view(), 1, &cfg).unwrap();
        assert!(dvdz[0].is_finite());
        assert!(dvdz[1].is_nan());
        assert!(dvdz[2].is_nan());
    }

    #[test]
    fn test_shear_rejects_edge_index() {
        let cfg = config();
        let xax = arr1(&[-41.0, -40.0, -39.0]);
        let zz = arr2(&[[26.0, 26.0, 27.0]]);
        assert!(matches!(
            thermal_wind_shear(zz.view(), xax.view(), 0, &cfg),
            Err(OceanDiagError::IndexOutOfRange { index: 0, len: 3 })
        ));
        assert!(thermal_wind_shear(zz.view(), xax.view(), 2, &cfg).is_err());
        assert!(matches!(
            thermal_wind_shear(zz.view(), arr1(&[0.0, 1.0]).view(), 1, &cfg),
            Err(OceanDiagError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_integrate_excludes_nan_from_length() {
        let dvdz = arr1(&[1e-7, f64::NAN, 2e-7]);
        assert_eq!(count_valid(dvdz.view()), 2);
        let v = integrate_velocity(dvdz.view(), 50.0);
        assert_eq!(v.len(), 2);
        assert_eq!(v[1], 0.0);
        assert_eq!(v[0], 1e-7 * 50.0);
    }

    #[test]
    fn test_integrate_interior_nan_propagates_upward() {
        let dvdz = arr1(&[1e-7, f64::NAN, 2e-7, 3e-7]);
        assert_eq!(count_valid(dvdz.view()), 3);
        let v = integrate_velocity(dvdz.view(), 50.0);
        assert_eq!(v.len(), 3);
        assert_eq!(v[2], 0.0);
        assert!(v[1].is_nan());
        assert!(v[0].is_nan());
    }

    #[test]
    fn test_integrate_recurrence() {
        let dvdz = arr1(&[3e-6, -1e-6, 2e-6, 5e-7, f64::NAN, f64::NAN]);
        let dz = 50.0;
        let v = integrate_velocity(dvdz.view(), dz);
        assert_eq!(v.len(), 4);
        assert_eq!(v[3], 0.0);
        for n in 0..3 {
            assert!((v[n] - v[n + 1] - dvdz[n] * dz).abs() < 1e-15);
        }
    }

    #[test]
    fn test_integrate_degenerate_lengths() {
        assert_eq!(integrate_velocity(arr1(&[f64::NAN]).view(), 50.0).len(), 0);
        let single = integrate_velocity(arr1(&[4e-6]).view(), 50.0);
        assert_eq!(single.to_vec(), vec![0.0]);
    }
}
