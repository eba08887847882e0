//! Centralized error handling for ocean_diag
//!
//! Every fallible operation in the crate returns [`Result`], so a failed run
//! reports which file, variable or index was at fault instead of panicking.
//! Missing data (NaN) is never an error; it flows through the arithmetic.

use std::fmt;

/// Main error type for ocean_diag operations
#[derive(Debug)]
pub enum OceanDiagError {
    /// NetCDF file operation errors
    NetCDFError(netcdf::Error),

    /// I/O operation errors
    IoError(std::io::Error),

    /// Variable not found in the input file
    VariableNotFound { var: String },

    /// A coordinate axis does not contain the requested value
    CoordinateNotFound { axis: String, value: f64 },

    /// An index (or the neighbours of an index) fall outside an axis
    IndexOutOfRange { index: usize, len: usize },

    /// Arrays that must agree in shape do not
    ShapeMismatch { message: String },

    /// A numeric parameter is outside its valid domain
    InvalidParameter { message: String },

    /// Thread pool configuration error
    ThreadPoolError(String),

    /// Array shape or dimension error
    ArrayError(ndarray::ShapeError),

    /// Figure encoding or writing error
    ImageError(image::ImageError),

    /// Coastline shapefile could not be read
    ShapefileError(String),

    /// Generic error
    Generic(String),
}

impl fmt::Display for OceanDiagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OceanDiagError::NetCDFError(e) => write!(f, "NetCDF error: {}", e),
            OceanDiagError::IoError(e) => write!(f, "I/O error: {}", e),
            OceanDiagError::VariableNotFound { var } => {
                write!(f, "Variable '{}' not found in file", var)
            }
            OceanDiagError::CoordinateNotFound { axis, value } => {
                write!(f, "Value {} not found on coordinate axis '{}'", value, axis)
            }
            OceanDiagError::IndexOutOfRange { index, len } => write!(
                f,
                "Index {} and its neighbours are out of range for axis of length {}",
                index, len
            ),
            OceanDiagError::ShapeMismatch { message } => write!(f, "Shape mismatch: {}", message),
            OceanDiagError::InvalidParameter { message } => {
                write!(f, "Invalid parameter: {}", message)
            }
            OceanDiagError::ThreadPoolError(msg) => write!(f, "Thread pool error: {}", msg),
            OceanDiagError::ArrayError(e) => write!(f, "Array error: {}", e),
            OceanDiagError::ImageError(e) => write!(f, "Image error: {}", e),
            OceanDiagError::ShapefileError(msg) => write!(f, "Shapefile error: {}", msg),
            OceanDiagError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for OceanDiagError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OceanDiagError::NetCDFError(e) => Some(e),
            OceanDiagError::IoError(e) => Some(e),
            OceanDiagError::ArrayError(e) => Some(e),
            OceanDiagError::ImageError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<netcdf::Error> for OceanDiagError {
    fn from(error: netcdf::Error) -> Self {
        OceanDiagError::NetCDFError(error)
    }
}

impl From<std::io::Error> for OceanDiagError {
    fn from(error: std::io::Error) -> Self {
        OceanDiagError::IoError(error)
    }
}

impl From<ndarray::ShapeError> for OceanDiagError {
    fn from(error: ndarray::ShapeError) -> Self {
        OceanDiagError::ArrayError(error)
    }
}

impl From<image::ImageError> for OceanDiagError {
    fn from(error: image::ImageError) -> Self {
        OceanDiagError::ImageError(error)
    }
}

impl From<shapefile::Error> for OceanDiagError {
    fn from(error: shapefile::Error) -> Self {
        OceanDiagError::ShapefileError(error.to_string())
    }
}

impl From<String> for OceanDiagError {
    fn from(error: String) -> Self {
        OceanDiagError::Generic(error)
    }
}

impl From<&str> for OceanDiagError {
    fn from(error: &str) -> Self {
        OceanDiagError::Generic(error.to_string())
    }
}

/// Result type alias for ocean_diag operations
pub type Result<T> = std::result::Result<T, OceanDiagError>;
