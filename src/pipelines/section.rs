//! Thermal wind at one longitude of the IGY 24N density section

use super::{open_input, save_figure, OutputOptions};
use crate::dataset::DerivedWriter;
use crate::errors::{OceanDiagError, Result};
use crate::render::{contour_levels, ColorbarLayout, FontSizes, LineSpec, TickFormat, BLUE};
use crate::thermal_wind::{
    count_valid, find_coordinate_index, integrate_velocity, thermal_wind_shear, ThermalWindConfig,
};
use ndarray::{s, Array1};
use std::path::{Path, PathBuf};

pub const NEUTRAL_DENSITY_PNG: &str = "Neutral_density_IGY24N.png";
pub const THERMAL_WIND_PNG: &str = "Thermal_wind_IGY24N_40W.png";
pub const VELOCITY_PNG: &str = "v_IGY24N.png";

/// Number of filled-contour intervals aimed for on the density section.
const DENSITY_CONTOUR_BANDS: usize = 8;

/// Settings of the thermal-wind run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionConfig {
    /// Longitude of the velocity profile in degrees
    pub longitude: f64,
    /// Vertical spacing of the section in dbar
    pub dz: f64,
    pub balance: ThermalWindConfig,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            longitude: -40.0,
            dz: 50.0,
            balance: ThermalWindConfig::default(),
        }
    }
}

/// Results of the thermal-wind run
#[derive(Debug, Clone)]
pub struct SectionOutput {
    pub figures: Vec<PathBuf>,
    /// Column of the section at the requested longitude
    pub index: usize,
    /// Vertical shear `dv/dz` (1/s) on every pressure level
    pub dvdz: Array1<f64>,
    /// Number of levels with a defined shear
    pub length_good: usize,
    /// Velocity (m/s) relative to the deepest valid level
    pub velocity: Array1<f64>,
}

/// Contour the section, then compute and plot the thermal wind at `config.longitude`.
pub fn run_thermal_wind(input: &Path, config: &SectionConfig, options: &OutputOptions) -> Result<SectionOutput> {
    options.prepare()?;
    let dataset = open_input(input)?;

    let xax = dataset.read_vector("xax")?;
    let yax = dataset.read_vector("yax")?;
    let zz = dataset.read_grid("zz")?;
    println!("xax {:?}, yax {:?}, zz {:?}", xax.dim(), yax.dim(), zz.dim());
    if zz.dim() != (yax.len(), xax.len()) {
        return Err(OceanDiagError::ShapeMismatch {
            message: format!(
                "zz is {:?} but yax has {} levels and xax {} positions",
                zz.dim(),
                yax.len(),
                xax.len()
            ),
        });
    }

    let mut figures = Vec::with_capacity(3);

    let (min, max) = zz
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let levels = contour_levels(min, max, DENSITY_CONTOUR_BANDS);
    if levels.len() < 2 {
        return Err(OceanDiagError::InvalidParameter {
            message: "density section holds no finite values".to_string(),
        });
    }
    let mut fig = options.figure(12.0, 8.0, FontSizes::default());
    fig.invert_yaxis();
    fig.contourf(xax.view(), yax.view(), zz.view(), &levels)?;
    fig.colorbar(&levels, &ColorbarLayout::default())?;
    fig.set_xlabel("Longitude (degrees)");
    fig.set_ylabel("Pressure (db)");
    fig.set_title("Neutral density along IGY 24N section");
    figures.push(save_figure(&mut fig, options, NEUTRAL_DENSITY_PNG)?);

    let index = find_coordinate_index(xax.view(), "xax", config.longitude)?;
    println!("Index of longitude {}: {}", config.longitude, index);

    let dvdz = thermal_wind_shear(zz.view(), xax.view(), index, &config.balance)?;

    let mut fig = options.figure(12.0, 8.0, FontSizes::default());
    fig.invert_yaxis();
    fig.line(dvdz.view(), yax.view(), LineSpec::solid(BLUE))?;
    fig.set_x_tick_format(TickFormat::Scientific);
    fig.set_xlabel("dv/dz (s⁻¹)");
    fig.set_ylabel("Pressure (db)");
    fig.set_title(&format!(
        "Thermal wind dv/dz at {}, IGY 24N",
        longitude_label(config.longitude)
    ));
    figures.push(save_figure(&mut fig, options, THERMAL_WIND_PNG)?);

    let length_good = count_valid(dvdz.view());
    println!("Levels with a defined shear: {}", length_good);
    let velocity = integrate_velocity(dvdz.view(), config.dz);

    // The bottom sample is the zero reference and is left off the plot.
    let shown = length_good.saturating_sub(1);
    let mut fig = options.figure(12.0, 8.0, FontSizes::default());
    fig.invert_yaxis();
    fig.line(velocity.slice(s![..shown]), yax.slice(s![..shown]), LineSpec::solid(BLUE))?;
    fig.set_xlabel("v (m s⁻¹) offset from unknown bottom velocity");
    fig.set_ylabel("Pressure (db)");
    fig.set_title(&format!("v at {}, IGY 24N", longitude_label(config.longitude)));
    figures.push(save_figure(&mut fig, options, VELOCITY_PNG)?);

    if let Some(path) = &options.netcdf {
        let mut writer = DerivedWriter::create(path)?;
        writer.write_vector("pressure", "level", &yax, "dbar", "Sea pressure")?;
        writer.write_vector("dvdz", "level", &dvdz, "s-1", "Thermal wind shear dv/dz")?;
        if velocity.is_empty() {
            tracing::warn!("no valid shear levels, velocity not written");
        } else {
            writer.write_vector(
                "v",
                "valid_level",
                &velocity,
                "m s-1",
                "Meridional velocity relative to the deepest valid level",
            )?;
        }
        writer.finish()?;
    }

    Ok(SectionOutput {
        figures,
        index,
        dvdz,
        length_good,
        velocity,
    })
}

/// `40W`, `15E`, `0`.
fn longitude_label(lon: f64) -> String {
    if lon < 0.0 {
        format!("{}W", -lon)
    } else if lon > 0.0 {
        format!("{}E", lon)
    } else {
        "0".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longitude_label() {
        assert_eq!(longitude_label(-40.0), "40W");
        assert_eq!(longitude_label(15.5), "15.5E");
        assert_eq!(longitude_label(0.0), "0");
    }

    #[test]
    fn test_default_config_matches_section_constants() {
        let config = SectionConfig::default();
        assert_eq!(config.longitude, -40.0);
        assert_eq!(config.dz, 50.0);
        assert_eq!(config.balance.latitude, 24.0);
    }
}
