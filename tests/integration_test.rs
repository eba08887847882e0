use ndarray::{arr1, Array1, Array2, Axis};
use netcdf::{create, open};
use ocean_diag::errors::OceanDiagError;
use ocean_diag::grid::{grid_spacing_distance, EARTH_RADIUS};
use ocean_diag::pipelines::{
    profiles, run_profiles, run_thermal_wind, run_winds, section, winds, OutputOptions, SectionConfig,
    WindsConfig,
};
use ocean_diag::seawater::{conservative_temperature, density, sigma0, sigma2, sigma4, SIGMA_OFFSET};
use ocean_diag::thermal_wind::ThermalWindConfig;
use std::path::Path;
use tempfile::tempdir;

/// Writes `[1, n]` coordinate rows the way the course files store them.
fn put_row(file: &mut netcdf::FileMut, name: &str, dim: &str, values: &Array1<f64>) {
    let mut var = file
        .add_variable::<f64>(name, &["one", dim])
        .expect("Failed to add variable");
    let row = values.clone().insert_axis(Axis(0));
    var.put(row.view(), ..).expect("Failed to write data");
}

fn write_winds_file(path: &Path, lats: &Array1<f64>, lons: &Array1<f64>) {
    let mut file = create(path).expect("Failed to create NetCDF file");
    file.add_dimension("one", 1).unwrap();
    file.add_dimension("lat", lats.len()).unwrap();
    file.add_dimension("lon", lons.len()).unwrap();
    put_row(&mut file, "lats", "lat", lats);
    put_row(&mut file, "lons", "lon", lons);

    let shape = (lats.len(), lons.len());
    let fields = [
        ("ujanuary", Array2::from_elem(shape, 3.0)),
        ("vjanuary", Array2::from_elem(shape, 4.0)),
        ("ujuly", Array2::from_shape_fn(shape, |(i, _)| lats[i] / 10.0)),
        ("vjuly", Array2::from_shape_fn(shape, |(_, j)| (lons[j].to_radians()).sin())),
    ];
    for (name, field) in fields {
        let mut var = file.add_variable::<f64>(name, &["lat", "lon"]).unwrap();
        var.put(field.view(), ..).unwrap();
    }
}

fn section_axes() -> (Array1<f64>, Array1<f64>) {
    (arr1(&[-42.0, -41.0, -40.0, -39.0, -38.0]), arr1(&[0.0, 50.0, 100.0, 150.0]))
}

fn write_section_file(path: &Path) {
    let (xax, yax) = section_axes();
    let mut zz = Array2::from_shape_fn((yax.len(), xax.len()), |(k, j)| 26.0 + 0.1 * j as f64 + 0.01 * k as f64);
    zz[(3, 3)] = -999.0;

    let mut file = create(path).expect("Failed to create NetCDF file");
    file.add_dimension("one", 1).unwrap();
    file.add_dimension("position", xax.len()).unwrap();
    file.add_dimension("level", yax.len()).unwrap();
    put_row(&mut file, "xax", "position", &xax);
    put_row(&mut file, "yax", "level", &yax);
    let mut var = file.add_variable::<f64>("zz", &["level", "position"]).unwrap();
    var.put_attribute("_FillValue", -999.0f64).unwrap();
    var.put(zz.view(), ..).unwrap();
}

fn station_profile() -> (Array1<f64>, Array1<f64>, Array1<f64>) {
    (
        arr1(&[36.0, 35.2, 34.95, 34.9]),
        arr1(&[24.0, 8.0, 3.5, 2.0]),
        arr1(&[0.0, 1000.0, 2500.0, 4500.0]),
    )
}

fn write_station_file(path: &Path) {
    let (salinity, temperature, pressure) = station_profile();
    let mut file = create(path).expect("Failed to create NetCDF file");
    file.add_dimension("sample", pressure.len()).unwrap();
    file.add_dimension("one", 1).unwrap();
    for (name, values) in [("salinity", &salinity), ("temperature", &temperature), ("pressure", &pressure)] {
        let mut var = file.add_variable::<f64>(name, &["sample", "one"]).unwrap();
        let column = values.clone().insert_axis(Axis(1));
        var.put(column.view(), ..).unwrap();
    }
}

#[test]
fn test_winds_pipeline_end_to_end() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let input = temp_dir.path().join("nogapswinds.nc");
    let lats = Array1::range(-86.25, 90.0, 7.5);
    let lons = Array1::range(0.0, 360.0, 7.5);
    write_winds_file(&input, &lats, &lons);

    let out_dir = temp_dir.path().join("figures");
    let derived = temp_dir.path().join("winds_derived.nc");
    let options = OutputOptions::new(&out_dir).with_netcdf(&derived);
    let config = WindsConfig {
        stride: 8,
        spacing_deg: 7.5,
        coastline: None,
    };
    let output = run_winds(&input, &config, &options).expect("winds pipeline failed");

    // 24 × 48 grid decimated by 8.
    assert_eq!(output.decimated_shape, (3, 6));
    for name in [winds::JANUARY_WINDS_PNG, winds::JULY_WINDS_PNG, winds::ZONAL_KE_PNG] {
        assert!(out_dir.join(name).exists(), "missing {}", name);
    }
    assert_eq!(output.figures.len(), 3);

    assert_eq!(output.zonal_ke.len(), lats.len());
    assert!(output.zonal_ke.iter().all(|&ke| ke == 25.0));
    assert!((output.mean_ke - 25.0).abs() < 1e-9);

    let dy = grid_spacing_distance(7.5, EARTH_RADIUS);
    assert_eq!(output.cell_area.dim(), (lats.len(), lons.len()));
    for (row, &lat) in lats.iter().enumerate() {
        let expected = dy * dy * lat.to_radians().cos();
        assert!(output.cell_area.row(row).iter().all(|&a| a == expected));
    }

    let file = open(&derived).expect("Failed to open derived file");
    let history = file.attribute("history").expect("history attribute missing");
    match history.value().unwrap() {
        netcdf::AttributeValue::Str(s) => assert!(s.starts_with("Created by ocean_diag on ")),
        other => panic!("unexpected history attribute {:?}", other),
    }
    let zonal = file.variable("zonal_ke_january").expect("zonal KE not written");
    let values = zonal.get_values::<f64, _>(..).unwrap();
    assert!(values.iter().all(|&v| v == 25.0));
    let area = file.variable("cell_area").expect("cell area not written");
    assert_eq!(area.dimensions().len(), 2);
}

#[test]
fn test_winds_pipeline_rejects_mismatched_fields() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let input = temp_dir.path().join("bad_winds.nc");
    {
        let mut file = create(&input).unwrap();
        file.add_dimension("one", 1).unwrap();
        file.add_dimension("lat", 4).unwrap();
        file.add_dimension("lon", 6).unwrap();
        file.add_dimension("lon_short", 5).unwrap();
        put_row(&mut file, "lats", "lat", &arr1(&[-45.0, -15.0, 15.0, 45.0]));
        put_row(&mut file, "lons", "lon", &Array1::range(0.0, 360.0, 60.0));
        for name in ["ujanuary", "vjanuary", "ujuly", "vjuly"] {
            let dim = if name == "vjuly" { "lon_short" } else { "lon" };
            let mut var = file.add_variable::<f64>(name, &["lat", dim]).unwrap();
            let field = Array2::<f64>::zeros((4, if name == "vjuly" { 5 } else { 6 }));
            var.put(field.view(), ..).unwrap();
        }
    }

    let options = OutputOptions::new(temp_dir.path().join("out"));
    let result = run_winds(&input, &WindsConfig::default(), &options);
    assert!(matches!(result, Err(OceanDiagError::ShapeMismatch { .. })));
}

#[test]
fn test_winds_pipeline_missing_coastline() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let input = temp_dir.path().join("nogapswinds.nc");
    let lats = Array1::range(-86.25, 90.0, 7.5);
    let lons = Array1::range(0.0, 360.0, 7.5);
    write_winds_file(&input, &lats, &lons);

    let options = OutputOptions::new(temp_dir.path().join("figures"));
    let config = WindsConfig {
        stride: 8,
        spacing_deg: 7.5,
        coastline: Some(temp_dir.path().join("missing_coastline.shp")),
    };
    let result = run_winds(&input, &config, &options);
    assert!(matches!(result, Err(OceanDiagError::ShapefileError(_))));
}

#[test]
fn test_thermal_wind_pipeline_end_to_end() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let input = temp_dir.path().join("igy24n.nc");
    write_section_file(&input);

    let out_dir = temp_dir.path().join("figures");
    let derived = temp_dir.path().join("section_derived.nc");
    let options = OutputOptions::new(&out_dir).with_netcdf(&derived);
    let config = SectionConfig::default();
    let output = run_thermal_wind(&input, &config, &options).expect("thermal wind pipeline failed");

    assert_eq!(output.index, 2);
    for name in [section::NEUTRAL_DENSITY_PNG, section::THERMAL_WIND_PNG, section::VELOCITY_PNG] {
        assert!(out_dir.join(name).exists(), "missing {}", name);
    }

    // The fill value at level 3 east of -40 masks that level's shear.
    assert_eq!(output.dvdz.len(), 4);
    assert!(output.dvdz[3].is_nan());
    assert_eq!(output.length_good, 3);

    let balance = ThermalWindConfig::default();
    let expected = -(9.8 / (balance.coriolis() * 1035.0)) * 0.2 / balance.zonal_distance(2.0);
    for level in 0..3 {
        assert!((output.dvdz[level] - expected).abs() < 1e-9 * expected.abs());
    }

    let v = &output.velocity;
    assert_eq!(v.len(), 3);
    assert_eq!(v[2], 0.0);
    for n in 0..2 {
        assert!((v[n] - v[n + 1] - output.dvdz[n] * 50.0).abs() < 1e-15);
    }

    let file = open(&derived).expect("Failed to open derived file");
    let written = file.variable("v").expect("velocity not written");
    assert_eq!(written.dimensions()[0].len(), 3);
    assert!(file.variable("dvdz").is_some());
}

#[test]
fn test_thermal_wind_pipeline_missing_longitude() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let input = temp_dir.path().join("igy24n.nc");
    write_section_file(&input);

    let options = OutputOptions::new(temp_dir.path());
    let config = SectionConfig {
        longitude: -40.5,
        ..SectionConfig::default()
    };
    let result = run_thermal_wind(&input, &config, &options);
    assert!(matches!(result, Err(OceanDiagError::CoordinateNotFound { .. })));

    let edge = SectionConfig {
        longitude: -42.0,
        ..SectionConfig::default()
    };
    let result = run_thermal_wind(&input, &edge, &options);
    assert!(matches!(result, Err(OceanDiagError::IndexOutOfRange { index: 0, len: 5 })));
}

#[test]
fn test_profiles_pipeline_end_to_end() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let input = temp_dir.path().join("a20_station64.nc");
    write_station_file(&input);

    let out_dir = temp_dir.path().join("figures");
    let derived = temp_dir.path().join("profiles_derived.nc");
    let options = OutputOptions::new(&out_dir).with_netcdf(&derived);
    let output = run_profiles(&input, &options).expect("profiles pipeline failed");

    for name in [
        profiles::TEMPERATURE_PNG,
        profiles::SALINITY_PNG,
        profiles::THETA_SALINITY_PNG,
        profiles::DENSITY_PNG,
    ] {
        assert!(out_dir.join(name).exists(), "missing {}", name);
    }

    let (salinity, temperature, pressure) = station_profile();
    let props = &output.properties;
    assert_eq!(props.len(), 4);
    for i in 0..4 {
        let (s, t, p) = (salinity[i], temperature[i], pressure[i]);
        let ct = conservative_temperature(s, t, p);
        assert_eq!(props.conservative_temperature[i], ct);
        assert_eq!(props.density[i], density(s, ct, p));
        assert_eq!(props.potential_density_0[i], sigma0(s, ct) + SIGMA_OFFSET);
        assert_eq!(props.potential_density_2000[i], sigma2(s, ct) + SIGMA_OFFSET);
        assert_eq!(props.potential_density_4000[i], sigma4(s, ct) + SIGMA_OFFSET);
        assert!(props.potential_temperature[i] <= t + 1e-12);
    }
    assert!((props.potential_temperature[0] - temperature[0]).abs() < 1e-12);
    assert!(props.density[3] > props.potential_density_0[3]);

    let file = open(&derived).expect("Failed to open derived file");
    for name in [
        "pressure",
        "potential_temperature",
        "conservative_temperature",
        "density",
        "potential_density_0",
        "potential_density_2000",
        "potential_density_4000",
    ] {
        assert!(file.variable(name).is_some(), "missing {}", name);
    }
}

#[test]
fn test_pipeline_reports_missing_variable() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let input = temp_dir.path().join("station.nc");
    {
        let mut file = create(&input).unwrap();
        file.add_dimension("sample", 3).unwrap();
        let mut var = file.add_variable::<f64>("salinity", &["sample"]).unwrap();
        var.put(arr1(&[35.0, 35.0, 35.0]).view(), ..).unwrap();
    }

    let options = OutputOptions::new(temp_dir.path());
    match run_profiles(&input, &options) {
        Err(OceanDiagError::VariableNotFound { var }) => assert_eq!(var, "pressure"),
        other => panic!("expected a missing variable, got {:?}", other.map(|o| o.figures)),
    }
}
