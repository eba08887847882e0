//! NetCDF ingestion of named arrays and output of derived arrays
//!
//! Input files hold the same variable names as the course data sets
//! (`lons`, `lats`, `ujanuary`, `zz`, `salinity`, ...). Coordinates are often
//! stored as `[1, n]` matrices, so readers squeeze singleton axes before
//! handing arrays to the numerics.

use crate::errors::{OceanDiagError, Result};
use chrono::Utc;
use ndarray::{Array1, Array2, ArrayD, Axis, Ix1, Ix2};
use netcdf::{AttributeValue, File, FileMut, Variable};
use std::collections::HashMap;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Summary of a variable as listed by [`Dataset::describe`]
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSummary {
    pub name: String,
    pub dimensions: Vec<String>,
    pub shape: Vec<usize>,
}

/// A read-only NetCDF data set
pub struct Dataset {
    file: File,
    path: PathBuf,
}

impl Dataset {
    /// Open a NetCDF file for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = netcdf::open(path)?;
        tracing::info!(path = %path.display(), "opened dataset");
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of every variable in the file, in file order.
    pub fn variable_names(&self) -> Vec<String> {
        self.file.variables().map(|v| v.name()).collect()
    }

    /// Dimension names and shape of every variable.
    pub fn describe(&self) -> Vec<VariableSummary> {
        self.file
            .variables()
            .map(|var| VariableSummary {
                name: var.name(),
                dimensions: var.dimensions().iter().map(|d| d.name()).collect(),
                shape: var.dimensions().iter().map(|d| d.len()).collect(),
            })
            .collect()
    }

    /// Prints global attributes and variables of the file.
    pub fn print_summary(&self) -> Result<()> {
        println!("\n===== Global Attributes =====");
        for attr in self.file.attributes() {
            println!("- {}: {:?}", attr.name(), attr.value()?);
        }

        println!("\n===== Variables =====");
        for summary in self.describe() {
            let dims: Vec<String> = summary
                .dimensions
                .iter()
                .zip(&summary.shape)
                .map(|(name, len)| format!("{}[{}]", name, len))
                .collect();
            println!("- {} ({})", summary.name, dims.join(", "));
        }

        Ok(())
    }

    fn variable(&self, name: &str) -> Result<Variable<'_>> {
        self.file
            .variable(name)
            .ok_or_else(|| OceanDiagError::VariableNotFound {
                var: name.to_string(),
            })
    }

    /// Load a variable with its stored shape. Fill values become NaN.
    pub fn read_array(&self, name: &str) -> Result<ArrayD<f64>> {
        let var = self.variable(name)?;
        let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
        let mut values = var.get_values::<f64, _>(..)?;

        if let Some(fill) = fill_value(&var) {
            let mut replaced = 0usize;
            for value in values.iter_mut().filter(|v| **v == fill) {
                *value = f64::NAN;
                replaced += 1;
            }
            if replaced > 0 {
                tracing::debug!(variable = name, fill, replaced, "masked fill values");
            }
        }

        tracing::debug!(variable = name, ?shape, "loaded variable");
        Ok(ArrayD::from_shape_vec(shape, values)?)
    }

    /// Load a variable as a vector, dropping every length-1 axis.
    pub fn read_vector(&self, name: &str) -> Result<Array1<f64>> {
        let array = squeeze(self.read_array(name)?);
        let shape = array.shape().to_vec();
        array
            .into_dimensionality::<Ix1>()
            .map_err(|_| OceanDiagError::ShapeMismatch {
                message: format!("'{}' has shape {:?}, expected a vector", name, shape),
            })
    }

    /// Load a variable as a 2D grid, dropping leading or trailing length-1 axes.
    pub fn read_grid(&self, name: &str) -> Result<Array2<f64>> {
        let mut array = self.read_array(name)?;
        while array.ndim() > 2 {
            let last = array.ndim() - 1;
            if array.shape()[0] == 1 {
                array = array.index_axis_move(Axis(0), 0);
            } else if array.shape()[last] == 1 {
                array = array.index_axis_move(Axis(last), 0);
            } else {
                break;
            }
        }
        let shape = array.shape().to_vec();
        array
            .into_dimensionality::<Ix2>()
            .map_err(|_| OceanDiagError::ShapeMismatch {
                message: format!("'{}' has shape {:?}, expected a 2D grid", name, shape),
            })
    }
}

/// Removes length-1 axes until a single axis is left.
pub fn squeeze(mut array: ArrayD<f64>) -> ArrayD<f64> {
    while array.ndim() > 1 {
        match array.shape().iter().position(|&n| n == 1) {
            Some(axis) => array = array.index_axis_move(Axis(axis), 0),
            None => break,
        }
    }
    array
}

fn fill_value(var: &Variable<'_>) -> Option<f64> {
    ["_FillValue", "missing_value"].iter().find_map(|name| {
        let attr = var.attribute(name)?;
        match attr.value().ok()? {
            AttributeValue::Float(v) => Some(v as f64),
            AttributeValue::Double(v) => Some(v),
            AttributeValue::Short(v) => Some(v as f64),
            AttributeValue::Int(v) => Some(v as f64),
            _ => None,
        }
    })
}

/// Writes derived arrays to a fresh NetCDF file
pub struct DerivedWriter {
    file: FileMut,
    path: PathBuf,
    dimensions: HashMap<String, usize>,
}

impl DerivedWriter {
    /// Create the output file, replacing any existing one.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            fs::remove_file(path)?;
        }

        let mut file = netcdf::create(path)?;
        file.add_attribute(
            "history",
            format!("Created by ocean_diag on {}", Utc::now().to_rfc3339()),
        )?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
            dimensions: HashMap::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_dimension(&mut self, name: &str, len: usize) -> Result<()> {
        match self.dimensions.get(name) {
            Some(&existing) if existing == len => Ok(()),
            Some(&existing) => Err(OceanDiagError::ShapeMismatch {
                message: format!(
                    "dimension '{}' already defined with length {}, got {}",
                    name, existing, len
                ),
            }),
            None => {
                self.file.add_dimension(name, len)?;
                self.dimensions.insert(name.to_string(), len);
                Ok(())
            }
        }
    }

    /// Write a 1D array along `dim`.
    pub fn write_vector(
        &mut self,
        name: &str,
        dim: &str,
        data: &Array1<f64>,
        units: &str,
        long_name: &str,
    ) -> Result<()> {
        self.ensure_dimension(dim, data.len())?;
        let mut var = self.file.add_variable::<f64>(name, &[dim])?;
        var.put_attribute("units", units)?;
        var.put_attribute("long_name", long_name)?;
        var.put(data.view(), ..)?;
        Ok(())
    }

    /// Write a 2D array with dimensions `dims = [rows, cols]`.
    pub fn write_grid(
        &mut self,
        name: &str,
        dims: [&str; 2],
        data: &Array2<f64>,
        units: &str,
        long_name: &str,
    ) -> Result<()> {
        self.ensure_dimension(dims[0], data.nrows())?;
        self.ensure_dimension(dims[1], data.ncols())?;
        let mut var = self.file.add_variable::<f64>(name, &dims)?;
        var.put_attribute("units", units)?;
        var.put_attribute("long_name", long_name)?;
        var.put(data.view(), ..)?;
        Ok(())
    }

    /// Flush and close the file.
    pub fn finish(self) -> Result<()> {
        tracing::info!(path = %self.path.display(), "wrote derived arrays");
        drop(self.file);
        Ok(())
    }
}
