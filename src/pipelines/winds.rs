//! Global January and July winds on the NOGAPS grid

use super::{open_input, save_figure, OutputOptions};
use crate::coastline::Coastline;
use crate::dataset::{Dataset, DerivedWriter};
use crate::errors::{OceanDiagError, Result};
use crate::grid::{arange, cell_area, decimate, meshgrid, NOGAPS_SPACING_DEG};
use crate::render::{FontSizes, LineSpec, MapBounds, BLUE};
use crate::statistics::{area_weighted_mean, kinetic_energy, ZonalReduction};
use ndarray::{Array1, Array2};
use std::path::{Path, PathBuf};

pub const JANUARY_WINDS_PNG: &str = "January_winds.png";
pub const JULY_WINDS_PNG: &str = "July_winds.png";
pub const ZONAL_KE_PNG: &str = "Zonal_KE_January.png";

/// Settings of the winds run
#[derive(Debug, Clone, PartialEq)]
pub struct WindsConfig {
    /// Keep every `stride`-th row and column for the arrow maps
    pub stride: usize,
    /// Grid spacing in degrees, used for the cell areas
    pub spacing_deg: f64,
    /// Shapefile outlined on both wind maps
    pub coastline: Option<PathBuf>,
}

impl Default for WindsConfig {
    fn default() -> Self {
        Self {
            stride: 8,
            spacing_deg: NOGAPS_SPACING_DEG,
            coastline: None,
        }
    }
}

/// Results of the winds run
#[derive(Debug, Clone)]
pub struct WindsOutput {
    pub figures: Vec<PathBuf>,
    /// Shape of the decimated fields drawn as arrows
    pub decimated_shape: (usize, usize),
    /// Zonal mean of `u² + v²` in January, per latitude
    pub zonal_ke: Array1<f64>,
    /// Area of each grid cell (m²)
    pub cell_area: Array2<f64>,
    /// Area-weighted global mean of January `u² + v²`
    pub mean_ke: f64,
}

struct WindField {
    u: Array2<f64>,
    v: Array2<f64>,
}

fn read_month(dataset: &Dataset, month: &str, shape: (usize, usize)) -> Result<WindField> {
    let u = dataset.read_grid(&format!("u{}", month))?;
    let v = dataset.read_grid(&format!("v{}", month))?;
    for (name, field) in [("u", &u), ("v", &v)] {
        if field.dim() != shape {
            return Err(OceanDiagError::ShapeMismatch {
                message: format!(
                    "{}{} is {:?} but the lat/lon grid is {:?}",
                    name,
                    month,
                    field.dim(),
                    shape
                ),
            });
        }
    }
    Ok(WindField { u, v })
}

#[allow(clippy::too_many_arguments)]
fn wind_map(
    options: &OutputOptions,
    file_name: &str,
    title: &str,
    bounds: MapBounds,
    x: &Array2<f64>,
    y: &Array2<f64>,
    wind: &WindField,
    stride: usize,
    coastline: Option<&Coastline>,
) -> Result<PathBuf> {
    let u = decimate(wind.u.view(), stride)?;
    let v = decimate(wind.v.view(), stride)?;

    let mut fig = options.figure(12.0, 12.0, FontSizes::default());
    fig.cylindrical_map(bounds);
    fig.quiver(x.view(), y.view(), u.view(), v.view(), BLUE)?;
    if let Some(coastline) = coastline {
        fig.coastlines(coastline);
    }
    fig.graticule(&arange(0.0, 360.0, 50.0), &arange(-90.0, 90.0, 30.0));
    fig.set_title(title);
    save_figure(&mut fig, options, file_name)
}

/// Draw the wind maps and the zonal kinetic energy of `input`.
pub fn run_winds(input: &Path, config: &WindsConfig, options: &OutputOptions) -> Result<WindsOutput> {
    options.prepare()?;
    let dataset = open_input(input)?;

    let lons = dataset.read_vector("lons")?;
    let lats = dataset.read_vector("lats")?;
    let shape = (lats.len(), lons.len());
    let january = read_month(&dataset, "january", shape)?;
    let july = read_month(&dataset, "july", shape)?;
    tracing::info!(?shape, stride = config.stride, "loaded wind fields");

    let (x, y) = meshgrid(lons.view(), lats.view());
    let x = decimate(x.view(), config.stride)?;
    let y = decimate(y.view(), config.stride)?;
    let decimated_shape = x.dim();
    tracing::debug!(?decimated_shape, "decimated grid");

    let coastline = config.coastline.as_ref().map(Coastline::load).transpose()?;

    let mut figures = Vec::with_capacity(3);
    figures.push(wind_map(
        options,
        JANUARY_WINDS_PNG,
        "January winds (m/s)",
        MapBounds::new((-80.0, 80.0), (0.0, 360.0)),
        &x,
        &y,
        &january,
        config.stride,
        coastline.as_ref(),
    )?);
    figures.push(wind_map(
        options,
        JULY_WINDS_PNG,
        "July winds (m/s)",
        MapBounds::new((-90.0, 90.0), (0.0, 360.0)),
        &x,
        &y,
        &july,
        config.stride,
        coastline.as_ref(),
    )?);

    let ke = kinetic_energy(january.u.view(), january.v.view())?;
    let zonal_ke = ke.zonal_mean()?;

    let mut fig = options.figure(12.0, 8.0, FontSizes::default());
    fig.line(lats.view(), zonal_ke.view(), LineSpec::solid(BLUE))?;
    fig.set_xlabel("Latitude (degrees)");
    fig.set_ylabel("Kinetic energy (m² s⁻²)");
    fig.set_title("Zonal KE average of January winds");
    figures.push(save_figure(&mut fig, options, ZONAL_KE_PNG)?);

    let cell_area = cell_area(lats.view(), lons.len(), config.spacing_deg)?;
    let mean_ke = area_weighted_mean(ke.view(), cell_area.view())?;
    tracing::info!(mean_ke, "area-weighted January kinetic energy");

    if let Some(path) = &options.netcdf {
        let mut writer = DerivedWriter::create(path)?;
        writer.write_vector("lats", "lat", &lats, "degrees_north", "Latitude")?;
        writer.write_vector("lons", "lon", &lons, "degrees_east", "Longitude")?;
        writer.write_vector(
            "zonal_ke_january",
            "lat",
            &zonal_ke,
            "m2 s-2",
            "Zonal mean of u^2 + v^2, January",
        )?;
        writer.write_grid("cell_area", ["lat", "lon"], &cell_area, "m2", "Grid cell area")?;
        writer.finish()?;
    }

    Ok(WindsOutput {
        figures,
        decimated_shape,
        zonal_ke,
        cell_area,
        mean_ke,
    })
}
