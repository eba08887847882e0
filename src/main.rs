//! Entry point for the ocean-diag application.
//! Handles CLI parsing, logging and thread-pool setup, and dispatches to the diagnostic pipelines.

use clap::Parser;
use ocean_diag::cli::{Args, Command, CommonArgs};
use ocean_diag::dataset::Dataset;
use ocean_diag::parallel::get_parallel_info;
use ocean_diag::pipelines::{run_profiles, run_thermal_wind, run_winds, OutputOptions};
use ocean_diag::render::{bundled_font, load_font};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn output_options(common: &CommonArgs) -> Result<OutputOptions, Box<dyn std::error::Error>> {
    let font = match &common.font {
        Some(path) => load_font(path)?,
        None => bundled_font()?,
    };
    let mut options = OutputOptions::new(&common.out_dir).with_font(Some(font));
    if let Some(path) = &common.output_netcdf {
        options = options.with_netcdf(path);
    }
    Ok(options)
}

fn report_netcdf(options: &OutputOptions) {
    if let Some(path) = &options.netcdf {
        println!("✅ Saved derived arrays to {}", path.display());
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args = Args::parse();
    init_logging(args.verbose);

    println!(
        r#"
------------------------------------------------------------------
                  ocean-diag  ·  ocean & atmosphere
              winds · thermal wind · station profiles
------------------------------------------------------------------
"#
    );

    args.parallel_config().setup_global_pool()?;
    get_parallel_info().log();

    match args.command {
        Command::Winds {
            common,
            stride,
            spacing,
            coastline,
        } => {
            let options = output_options(&common)?;
            let config = Command::winds_config(stride, spacing, coastline);
            let output = run_winds(&common.file, &config, &options)?;
            for path in &output.figures {
                println!("✅ Saved figure to {}", path.display());
            }
            println!("Decimated grid: {:?}", output.decimated_shape);
            println!(
                "Area-weighted mean January u² + v²: {:.3} m² s⁻²",
                output.mean_ke
            );
            report_netcdf(&options);
        }
        Command::ThermalWind {
            common,
            longitude,
            latitude,
            dz,
        } => {
            let options = output_options(&common)?;
            let config = Command::section_config(longitude, latitude, dz);
            let output = run_thermal_wind(&common.file, &config, &options)?;
            for path in &output.figures {
                println!("✅ Saved figure to {}", path.display());
            }
            if let Some(surface) = output.velocity.first() {
                println!("Surface velocity relative to the bottom: {:.4} m/s", surface);
            }
            report_netcdf(&options);
        }
        Command::Profiles { common } => {
            let options = output_options(&common)?;
            let output = run_profiles(&common.file, &options)?;
            for path in &output.figures {
                println!("✅ Saved figure to {}", path.display());
            }
            println!("Samples processed: {}", output.properties.len());
            report_netcdf(&options);
        }
        Command::Inspect { file } => {
            let dataset = Dataset::open(&file)?;
            println!("Successfully opened NetCDF file: {}", file.display());
            dataset.print_summary()?;
        }
    }

    Ok(())
}
