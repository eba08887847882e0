//! Creates synthetic input files for the three ocean-diag pipelines.
//!
//! The files mimic the course data sets: coordinates are stored as `[1, n]`
//! matrices, the section has missing values below the sea floor, and the
//! variable names match what the pipelines read.
//!
//! ```text
//! cargo run --example create_sample_data -- sample_data
//! ```

use ndarray::{Array1, Array2};
use netcdf::create;
use std::path::Path;

const FILL: f64 = -999.0;

fn remove_existing(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

fn write_row_vector(
    file: &mut netcdf::FileMut,
    name: &str,
    dim: &str,
    values: &Array1<f64>,
    units: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut var = file.add_variable::<f64>(name, &["one", dim])?;
    var.put_attribute("units", units)?;
    let matrix = values.clone().insert_axis(ndarray::Axis(0));
    var.put(matrix.view(), ..)?;
    Ok(())
}

fn create_winds(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let path = dir.join("nogapswinds.nc");
    remove_existing(&path)?;
    let (n_lat, n_lon) = (576, 1152);
    let spacing = 0.3125;

    let lats = Array1::from_shape_fn(n_lat, |i| -90.0 + i as f64 * spacing);
    let lons = Array1::from_shape_fn(n_lon, |j| j as f64 * spacing);

    let mut file = create(&path)?;
    file.add_attribute("title", "Synthetic NOGAPS winds")?;
    file.add_dimension("one", 1)?;
    file.add_dimension("lat", n_lat)?;
    file.add_dimension("lon", n_lon)?;
    write_row_vector(&mut file, "lats", "lat", &lats, "degrees_north")?;
    write_row_vector(&mut file, "lons", "lon", &lons, "degrees_east")?;

    for (month, shift) in [("january", -5.0), ("july", 5.0)] {
        // Trades, westerlies and polar easterlies, shifted with the season.
        let u = Array2::from_shape_fn((n_lat, n_lon), |(i, j)| {
            let lat = (lats[i] - shift).to_radians();
            let lon = lons[j].to_radians();
            -8.0 * (3.0 * lat).cos() * lat.cos() + 2.0 * (2.0 * lon).sin() * lat.cos()
        });
        let v = Array2::from_shape_fn((n_lat, n_lon), |(i, j)| {
            let lat = (lats[i] - shift).to_radians();
            let lon = lons[j].to_radians();
            3.0 * (2.0 * lat).sin() * (3.0 * lon).cos()
        });
        for (prefix, field) in [("u", &u), ("v", &v)] {
            let mut var = file.add_variable::<f64>(&format!("{}{}", prefix, month), &["lat", "lon"])?;
            var.put_attribute("units", "m/s")?;
            var.put(field.view(), ..)?;
        }
    }

    println!("✅ Wrote {}", path.display());
    Ok(())
}

fn create_section(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let path = dir.join("igy24n_gVSpressure_gr.nc");
    remove_existing(&path)?;

    let xax = Array1::range(-80.0, -9.5, 1.0);
    let yax = Array1::range(0.0, 6000.5, 50.0);
    let zz = Array2::from_shape_fn((yax.len(), xax.len()), |(k, j)| {
        let p: f64 = yax[k];
        let lon: f64 = xax[j];
        let floor = 5000.0 + 800.0 * ((lon + 45.0) / 12.0).cos();
        if p > floor {
            return FILL;
        }
        26.0 + 2.0 * (p / 6000.0).sqrt() + 0.4 * ((lon + 80.0) / 70.0) * (-p / 1000.0).exp()
    });

    let mut file = create(&path)?;
    file.add_attribute("title", "Synthetic IGY 24N neutral density section")?;
    file.add_dimension("one", 1)?;
    file.add_dimension("position", xax.len())?;
    file.add_dimension("level", yax.len())?;
    write_row_vector(&mut file, "xax", "position", &xax, "degrees_east")?;
    write_row_vector(&mut file, "yax", "level", &yax, "dbar")?;
    let mut var = file.add_variable::<f64>("zz", &["level", "position"])?;
    var.put_attribute("units", "kg m-3")?;
    var.put_attribute("_FillValue", FILL)?;
    var.put(zz.view(), ..)?;

    println!("✅ Wrote {}", path.display());
    Ok(())
}

fn create_station(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let path = dir.join("a20_station64.nc");
    remove_existing(&path)?;

    let pressure = Array1::range(2.0, 5400.0, 20.0);
    let temperature = pressure.mapv(|p: f64| 2.0 + 24.0 * (-p / 700.0).exp());
    let salinity = pressure.mapv(|p: f64| 34.9 + 1.6 * (-p / 600.0).exp());

    let mut file = create(&path)?;
    file.add_attribute("title", "Synthetic A20 station 64 cast")?;
    file.add_dimension("sample", pressure.len())?;
    file.add_dimension("one", 1)?;
    for (name, values, units) in [
        ("pressure", &pressure, "dbar"),
        ("temperature", &temperature, "degC"),
        ("salinity", &salinity, "psu"),
    ] {
        let mut var = file.add_variable::<f64>(name, &["sample", "one"])?;
        var.put_attribute("units", units)?;
        let column = values.clone().insert_axis(ndarray::Axis(1));
        var.put(column.view(), ..)?;
    }

    println!("✅ Wrote {}", path.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = std::env::args().nth(1).unwrap_or_else(|| ".".to_string());
    let dir = Path::new(&dir);
    std::fs::create_dir_all(dir)?;

    println!("🔨 Creating sample inputs in {}", dir.display());
    create_winds(dir)?;
    create_section(dir)?;
    create_station(dir)?;

    println!("\n🧪 Try the pipelines with:");
    println!("   cargo run -- winds -f {}/nogapswinds.nc", dir.display());
    println!("   cargo run -- thermal-wind -f {}/igy24n_gVSpressure_gr.nc", dir.display());
    println!("   cargo run -- profiles -f {}/a20_station64.nc", dir.display());
    Ok(())
}
