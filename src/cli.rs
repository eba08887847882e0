//! Defines command-line interface options using `clap` for the ocean-diag application.

use crate::grid::NOGAPS_SPACING_DEG;
use crate::parallel::ParallelConfig;
use crate::pipelines::{SectionConfig, WindsConfig};
use crate::thermal_wind::ThermalWindConfig;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// A CLI tool for ocean and atmosphere diagnostics
#[derive(Parser, Debug)]
#[command(
    version,
    name = "ocean-diag",
    about = "Wind, thermal-wind and hydrographic profile diagnostics from NetCDF data"
)]
pub struct Args {
    /// Enable verbose output.
    #[arg(short, long, default_value_t = false, global = true)]
    pub verbose: bool,

    /// Number of threads to use for parallel processing. Defaults to number of CPU cores.
    #[arg(short = 't', long, global = true)]
    pub threads: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// January/July wind maps and zonal kinetic energy
    Winds {
        #[command(flatten)]
        common: CommonArgs,

        /// Keep every n-th grid point in the arrow maps
        #[arg(long, default_value_t = 8)]
        stride: usize,

        /// Grid spacing in degrees used for the cell areas
        #[arg(long, default_value_t = NOGAPS_SPACING_DEG)]
        spacing: f64,

        /// Coastline shapefile (.shp) outlined on the wind maps
        #[arg(long)]
        coastline: Option<PathBuf>,
    },

    /// Density section, thermal-wind shear and integrated velocity
    ThermalWind {
        #[command(flatten)]
        common: CommonArgs,

        /// Longitude of the velocity profile in degrees
        #[arg(long, default_value_t = -40.0, allow_negative_numbers = true)]
        longitude: f64,

        /// Latitude of the section in degrees
        #[arg(long, default_value_t = 24.0, allow_negative_numbers = true)]
        latitude: f64,

        /// Vertical spacing of the section in dbar
        #[arg(long, default_value_t = 50.0)]
        dz: f64,
    },

    /// Temperature, salinity and density profiles of a station
    Profiles {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// List the variables, dimensions and attributes of a NetCDF file
    Inspect {
        /// Path to the NetCDF file
        #[arg(short, long)]
        file: PathBuf,
    },
}

/// Options shared by every pipeline
#[derive(ClapArgs, Debug, Clone)]
pub struct CommonArgs {
    /// Path to the NetCDF input file
    #[arg(short, long)]
    pub file: PathBuf,

    /// Directory receiving the PNG figures
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Path to save the derived arrays as NetCDF.
    #[arg(long)]
    pub output_netcdf: Option<PathBuf>,

    /// TrueType font for titles, labels and tick values. Defaults to the bundled DejaVu Sans Mono.
    #[arg(long)]
    pub font: Option<PathBuf>,
}

impl Args {
    /// Thread pool for `--threads`, or one thread per CPU core.
    pub fn parallel_config(&self) -> ParallelConfig {
        match self.threads {
            Some(threads) => ParallelConfig::with_threads(threads),
            None => ParallelConfig::all_cores(),
        }
    }
}

impl Command {
    pub fn winds_config(stride: usize, spacing: f64, coastline: Option<PathBuf>) -> WindsConfig {
        WindsConfig {
            stride,
            spacing_deg: spacing,
            coastline,
        }
    }

    pub fn section_config(longitude: f64, latitude: f64, dz: f64) -> SectionConfig {
        SectionConfig {
            longitude,
            dz,
            balance: ThermalWindConfig {
                latitude,
                ..ThermalWindConfig::default()
            },
        }
    }
}
