//! ocean_diag: wind, thermal-wind and hydrographic profile diagnostics
//!
//! A Rust library that reads gridded winds, hydrographic sections and station
//! casts from NetCDF files, derives the classic physical-oceanography
//! diagnostics from them and renders static PNG figures.
//!
//! ## Key Features
//!
//! - **Grid tools**: decimation of regular lat/lon grids and cell areas
//! - **Kinetic energy**: zonal and area-weighted means computed in parallel with Rayon
//! - **Thermal wind**: geostrophic shear from a density section and its vertical integral
//! - **Seawater**: TEOS-10 potential temperature, conservative temperature, density and sigma
//! - **Figures**: quiver maps, line and dot plots, filled contours with colorbars
//!
//! ## Module Organization
//!
//! - [`dataset`]: NetCDF input and derived-array output
//! - [`grid`]: decimation, meshgrid and cell areas
//! - [`statistics`]: kinetic energy and zonal reductions
//! - [`thermal_wind`]: thermal-wind shear and velocity integration
//! - [`seawater`]: thermodynamic conversions
//! - [`coastline`]: shapefile coastlines for the wind maps
//! - [`render`]: rasterized figures
//! - [`pipelines`]: the complete diagnostic runs
//! - [`parallel`]: parallel processing configuration
//! - [`errors`]: centralized error handling
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use ocean_diag::prelude::*;
//! use std::path::Path;
//!
//! let options = OutputOptions::new("figures");
//! let section = run_thermal_wind(
//!     Path::new("igy24n_gVSpressure_gr.nc"),
//!     &SectionConfig::default(),
//!     &options,
//! )
//! .unwrap();
//! println!("{} levels with a defined shear", section.length_good);
//! ```

pub mod cli;
pub mod coastline;
pub mod dataset;
pub mod errors;
pub mod grid;
pub mod parallel;
pub mod pipelines;
pub mod render;
pub mod seawater;
pub mod statistics;
pub mod thermal_wind;

pub use errors::*;
pub use parallel::*;

// High-level convenience API
pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::dataset::{Dataset, DerivedWriter};
    pub use crate::errors::{OceanDiagError, Result};
    pub use crate::grid::{cell_area, decimate, meshgrid};
    pub use crate::parallel::ParallelConfig;
    pub use crate::pipelines::{
        run_profiles, run_thermal_wind, run_winds, OutputOptions, SectionConfig, WindsConfig,
    };
    pub use crate::seawater::ProfileProperties;
    pub use crate::statistics::{zonal_kinetic_energy, ZonalReduction};
    pub use crate::thermal_wind::{integrate_velocity, thermal_wind_shear, ThermalWindConfig};
}
