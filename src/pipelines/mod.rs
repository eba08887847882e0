//! End-to-end diagnostic runs
//!
//! Each pipeline opens one input file, derives its quantities, renders its
//! figures into the output directory and optionally writes the derived
//! arrays to NetCDF. Pipelines are independent of each other.
//!
//! - [`winds`]: NOGAPS January/July wind maps and zonal kinetic energy
//! - [`section`]: thermal wind across the IGY 24N density section
//! - [`profiles`]: temperature, salinity and density profiles of a station cast

pub mod profiles;
pub mod section;
pub mod winds;

pub use profiles::{run_profiles, ProfilesOutput};
pub use section::{run_thermal_wind, SectionConfig, SectionOutput};
pub use winds::{run_winds, WindsConfig, WindsOutput};

use crate::dataset::Dataset;
use crate::errors::Result;
use crate::render::{Figure, FontSizes, DEFAULT_DPI};
use rusttype::Font;
use std::fs;
use std::path::{Path, PathBuf};

/// Where and how a pipeline writes its results
#[derive(Clone)]
pub struct OutputOptions {
    /// Directory receiving the PNG figures
    pub out_dir: PathBuf,
    /// Optional NetCDF file for the derived arrays
    pub netcdf: Option<PathBuf>,
    /// Font for titles, labels and tick values
    pub font: Option<Font<'static>>,
    pub dpi: f32,
}

impl OutputOptions {
    pub fn new<P: AsRef<Path>>(out_dir: P) -> Self {
        Self {
            out_dir: out_dir.as_ref().to_path_buf(),
            netcdf: None,
            font: None,
            dpi: DEFAULT_DPI,
        }
    }

    pub fn with_netcdf<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.netcdf = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_font(mut self, font: Option<Font<'static>>) -> Self {
        self.font = font;
        self
    }

    /// Create the output directory if needed.
    pub fn prepare(&self) -> Result<()> {
        if !self.out_dir.exists() {
            fs::create_dir_all(&self.out_dir)?;
        }
        if self.font.is_none() {
            tracing::warn!("no font given, figures will have no titles or labels");
        }
        Ok(())
    }

    pub fn figure(&self, width_in: f32, height_in: f32, sizes: FontSizes) -> Figure {
        Figure::new(width_in, height_in, self.dpi)
            .with_font(self.font.clone())
            .with_font_sizes(sizes)
    }

    pub fn figure_path(&self, name: &str) -> PathBuf {
        self.out_dir.join(name)
    }
}

/// Open an input file and print its variable names.
pub(crate) fn open_input(path: &Path) -> Result<Dataset> {
    let dataset = Dataset::open(path)?;
    println!("Variables in {}: {:?}", path.display(), dataset.variable_names());
    Ok(dataset)
}

/// Save a figure into the output directory and return its path.
pub(crate) fn save_figure(fig: &mut Figure, options: &OutputOptions, name: &str) -> Result<PathBuf> {
    let path = options.figure_path(name);
    fig.save_png(&path)?;
    Ok(path)
}
