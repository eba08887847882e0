//! Parallel zonal reductions
//!
//! Each latitude row is reduced independently, so rows are farmed out to the
//! Rayon pool. Unlike a NaN-skipping mean, a missing value anywhere in a row
//! makes that row's mean missing.

use crate::errors::{OceanDiagError, Result};
use ndarray::{Array1, ArrayView2, Axis};
use rayon::prelude::*;

/// Computes the mean of every row across the longitude axis in parallel.
pub fn parallel_zonal_mean(field: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
    let (rows, cols) = field.dim();
    if cols == 0 {
        return Err(OceanDiagError::InvalidParameter {
            message: format!("cannot average {} rows with no longitude samples", rows),
        });
    }

    tracing::debug!(
        rows,
        cols,
        threads = rayon::current_num_threads(),
        "computing zonal mean"
    );

    let means: Vec<f64> = field
        .axis_iter(Axis(0))
        .into_par_iter()
        .map(|row| row.sum() / cols as f64)
        .collect();

    Ok(Array1::from(means))
}
