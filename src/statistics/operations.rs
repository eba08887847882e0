//! Pointwise energy and area-weighted reductions on `[lat, lon]` grids.

use crate::errors::{OceanDiagError, Result};
use ndarray::{Array1, Array2, ArrayView2, Zip};

/// Trait for `[lat, lon]` fields that can be averaged along longitude
pub trait ZonalReduction {
    /// Mean of each row across columns
    ///
    /// # Errors
    ///
    /// Returns an error if the field has no columns.
    fn zonal_mean(&self) -> Result<Array1<f64>>;
}

impl ZonalReduction for Array2<f64> {
    fn zonal_mean(&self) -> Result<Array1<f64>> {
        super::parallel::parallel_zonal_mean(self.view())
    }
}

impl ZonalReduction for ArrayView2<'_, f64> {
    fn zonal_mean(&self) -> Result<Array1<f64>> {
        super::parallel::parallel_zonal_mean(self.view())
    }
}

fn ensure_same_shape(a: &ArrayView2<'_, f64>, b: &ArrayView2<'_, f64>, what: &str) -> Result<()> {
    if a.dim() != b.dim() {
        return Err(OceanDiagError::ShapeMismatch {
            message: format!("{}: {:?} vs {:?}", what, a.dim(), b.dim()),
        });
    }
    Ok(())
}

/// Kinetic energy per unit mass (without the ½), `u² + v²`.
pub fn kinetic_energy(u: ArrayView2<'_, f64>, v: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    ensure_same_shape(&u, &v, "wind components")?;
    Ok(Zip::from(&u).and(&v).map_collect(|&u, &v| u * u + v * v))
}

/// `Σ field·dA / Σ dA`; NaN anywhere in `field` yields NaN.
pub fn area_weighted_mean(field: ArrayView2<'_, f64>, area: ArrayView2<'_, f64>) -> Result<f64> {
    ensure_same_shape(&field, &area, "field and cell area")?;

    let total_area = area.sum();
    if total_area == 0.0 || !total_area.is_finite() {
        return Err(OceanDiagError::InvalidParameter {
            message: format!("total cell area must be positive and finite, got {}", total_area),
        });
    }

    let weighted = Zip::from(&field)
        .and(&area)
        .fold(0.0, |acc, &value, &da| acc + value * da);
    Ok(weighted / total_area)
}
