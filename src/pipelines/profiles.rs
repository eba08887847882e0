//! Vertical profiles of a hydrographic station cast

use super::{open_input, save_figure, OutputOptions};
use crate::dataset::DerivedWriter;
use crate::errors::Result;
use crate::render::{FontSizes, LineSpec, LineStyle, BLACK};
use crate::seawater::ProfileProperties;
use std::path::{Path, PathBuf};

pub const TEMPERATURE_PNG: &str = "temperature_verticalprofile.png";
pub const SALINITY_PNG: &str = "salinity_verticalprofile.png";
pub const THETA_SALINITY_PNG: &str = "thetasalinity.png";
pub const DENSITY_PNG: &str = "density_verticalprofile.png";

/// Pressure axis of every profile plot, surface at the top.
const PRESSURE_LIMITS: (f64, f64) = (6000.0, 0.0);

/// Results of the profiles run
#[derive(Debug, Clone)]
pub struct ProfilesOutput {
    pub figures: Vec<PathBuf>,
    pub properties: ProfileProperties,
}

/// Plot temperature, salinity, θ–S and density profiles of `input`.
pub fn run_profiles(input: &Path, options: &OutputOptions) -> Result<ProfilesOutput> {
    options.prepare()?;
    let dataset = open_input(input)?;

    let salinity = dataset.read_vector("salinity")?;
    let pressure = dataset.read_vector("pressure")?;
    let temperature = dataset.read_vector("temperature")?;
    tracing::info!(samples = pressure.len(), "loaded station profile");

    let properties = ProfileProperties::compute(salinity.view(), temperature.view(), pressure.view())?;
    let theta = &properties.potential_temperature;
    let (p_bottom, p_top) = PRESSURE_LIMITS;
    let mut figures = Vec::with_capacity(4);

    let mut fig = options.figure(12.0, 8.0, FontSizes::profile());
    fig.set_xlim(0.0, 30.0);
    fig.set_ylim(p_bottom, p_top);
    fig.line(temperature.view(), pressure.view(), LineSpec::solid(BLACK))?;
    fig.line(theta.view(), pressure.view(), LineSpec::new(BLACK, LineStyle::Dashed))?;
    fig.set_xlabel("Temperature (degrees Celsius)");
    fig.set_ylabel("Pressure (db)");
    fig.set_title("Temperature (solid line) versus potential temperature (dashed line)");
    figures.push(save_figure(&mut fig, options, TEMPERATURE_PNG)?);

    let mut fig = options.figure(12.0, 8.0, FontSizes::profile());
    fig.set_xlim(34.0, 38.0);
    fig.set_ylim(p_bottom, p_top);
    fig.line(salinity.view(), pressure.view(), LineSpec::solid(BLACK))?;
    fig.set_xlabel("Salinity (psu)");
    fig.set_ylabel("Pressure (db)");
    fig.set_title("Vertical profile of salinity");
    figures.push(save_figure(&mut fig, options, SALINITY_PNG)?);

    let mut fig = options.figure(12.0, 8.0, FontSizes::profile());
    fig.set_xlim(34.0, 38.0);
    fig.set_ylim(0.0, 30.0);
    fig.dots(salinity.view(), theta.view(), BLACK)?;
    fig.set_xlabel("Salinity (psu)");
    fig.set_ylabel("Potential temperature (degrees C)");
    fig.set_title("Potential temperature-salinity diagram");
    figures.push(save_figure(&mut fig, options, THETA_SALINITY_PNG)?);

    let mut fig = options.figure(12.0, 8.0, FontSizes::profile());
    fig.set_xlim(1020.0, 1060.0);
    fig.set_ylim(p_bottom, p_top);
    let density_lines = [
        (&properties.density, LineStyle::Solid),
        (&properties.potential_density_0, LineStyle::Dashed),
        (&properties.potential_density_2000, LineStyle::Dotted),
        (&properties.potential_density_4000, LineStyle::DashDot),
    ];
    for (values, style) in density_lines {
        fig.line(values.view(), pressure.view(), LineSpec::new(BLACK, style))?;
    }
    fig.set_xlabel("Density (kg m⁻³)");
    fig.set_ylabel("Pressure (db)");
    fig.set_title("Density (solid) vs σ₀ (dashed), σ₂₀₀₀ (dotted), and σ₄₀₀₀ (dash-dotted)");
    figures.push(save_figure(&mut fig, options, DENSITY_PNG)?);

    if let Some(path) = &options.netcdf {
        let mut writer = DerivedWriter::create(path)?;
        writer.write_vector("pressure", "sample", &pressure, "dbar", "Sea pressure")?;
        writer.write_vector(
            "potential_temperature",
            "sample",
            &properties.potential_temperature,
            "degC",
            "Potential temperature referenced to 0 dbar",
        )?;
        writer.write_vector(
            "conservative_temperature",
            "sample",
            &properties.conservative_temperature,
            "degC",
            "Conservative temperature",
        )?;
        writer.write_vector("density", "sample", &properties.density, "kg m-3", "In-situ density")?;
        writer.write_vector(
            "potential_density_0",
            "sample",
            &properties.potential_density_0,
            "kg m-3",
            "Potential density referenced to 0 dbar",
        )?;
        writer.write_vector(
            "potential_density_2000",
            "sample",
            &properties.potential_density_2000,
            "kg m-3",
            "Potential density referenced to 2000 dbar",
        )?;
        writer.write_vector(
            "potential_density_4000",
            "sample",
            &properties.potential_density_4000,
            "kg m-3",
            "Potential density referenced to 4000 dbar",
        )?;
        writer.finish()?;
    }

    Ok(ProfilesOutput { figures, properties })
}
