//! Error types for Level 3 retrieval requests.

use thiserror::Error;

use crate::bbox::BboxError;

/// Result type alias using L3Error.
pub type L3Result<T> = Result<T, L3Error>;

/// Request-level error taxonomy.
///
/// Every variant is terminal for the request that raised it; nothing is
/// retried internally.
#[derive(Debug, Error)]
pub enum L3Error {
    // === Request Errors ===
    #[error("Invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // === Data Errors ===
    #[error("No data available: {0}")]
    NoDataAvailable(String),

    #[error("Failed to open dataset: {0}")]
    DatasetOpenFailure(String),

    #[error("Failed to read dataset: {0}")]
    DatasetReadFailure(String),

    #[error("Bounding box selects no grid cells: {0}")]
    EmptyRegion(String),

    // === Rendering Errors ===
    #[error("Rendering failed: {0}")]
    RenderError(String),

    // === Infrastructure Errors ===
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl L3Error {
    /// Stable machine-readable name of the error kind.
    pub fn error_code(&self) -> &'static str {
        match self {
            L3Error::InvalidBoundingBox(_) => "InvalidBoundingBox",
            L3Error::InvalidParameter { .. } => "InvalidParameter",
            L3Error::NoDataAvailable(_) => "NoDataAvailable",
            L3Error::DatasetOpenFailure(_) => "DatasetOpenFailure",
            L3Error::DatasetReadFailure(_) => "DatasetReadFailure",
            L3Error::EmptyRegion(_) => "EmptyRegion",
            L3Error::RenderError(_) => "RenderError",
            L3Error::InternalError(_) => "InternalError",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            L3Error::InvalidBoundingBox(_) | L3Error::InvalidParameter { .. } => 400,

            L3Error::NoDataAvailable(_) => 404,

            L3Error::EmptyRegion(_) => 422,

            _ => 500,
        }
    }

    /// Create an InvalidParameter error.
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        L3Error::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }
}

impl From<BboxError> for L3Error {
    fn from(err: BboxError) -> Self {
        L3Error::InvalidBoundingBox(err.to_string())
    }
}
