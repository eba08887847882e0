//! Kinetic energy and zonal (along-longitude) reductions
//!
//! # Organization
//!
//! - [`operations`]: pointwise kinetic energy and the area-weighted mean
//! - [`parallel`]: row-parallel zonal mean over the longitude axis

pub mod operations;
pub mod parallel;

pub use operations::{area_weighted_mean, kinetic_energy, ZonalReduction};
pub use parallel::parallel_zonal_mean;

use crate::errors::Result;
use ndarray::{Array1, ArrayView2};

/// Zonal average of `u² + v²` for each latitude row.
pub fn zonal_kinetic_energy(u: ArrayView2<'_, f64>, v: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
    let ke = kinetic_energy(u, v)?;
    ke.zonal_mean()
}
