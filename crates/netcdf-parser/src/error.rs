//! Error types for NetCDF reading operations.

use std::path::PathBuf;

use l3_common::{GridShapeError, L3Error};
use thiserror::Error;

/// Result type for NetCDF parser operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

/// Error types for NetCDF reading.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// The file could not be opened as a NetCDF dataset
    #[error("failed to open {path:?}: {message}")]
    OpenFailed { path: PathBuf, message: String },

    /// Missing required variable or dimension
    #[error("{path:?}: missing required data: {what}")]
    MissingData { path: PathBuf, what: String },

    /// Variable has the wrong rank or does not match its axes
    #[error("{path:?}: invalid data format: {message}")]
    InvalidFormat { path: PathBuf, message: String },

    /// Reading variable values failed
    #[error("{path:?}: failed to read {variable}: {message}")]
    ReadFailed {
        path: PathBuf,
        variable: String,
        message: String,
    },

    /// Values read fine but do not form a grid
    #[error("{path:?}: {source}")]
    Shape {
        path: PathBuf,
        #[source]
        source: GridShapeError,
    },
}

impl NetCdfError {
    pub(crate) fn missing(path: &std::path::Path, what: impl Into<String>) -> Self {
        Self::MissingData {
            path: path.to_path_buf(),
            what: what.into(),
        }
    }

    pub(crate) fn invalid(path: &std::path::Path, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

impl From<NetCdfError> for L3Error {
    fn from(err: NetCdfError) -> Self {
        match err {
            NetCdfError::OpenFailed { .. } => L3Error::DatasetOpenFailure(err.to_string()),
            _ => L3Error::DatasetReadFailure(err.to_string()),
        }
    }
}
