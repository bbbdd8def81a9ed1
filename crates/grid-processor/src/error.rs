//! Error types for grid processing.

use l3_common::{BboxError, BoundingBox, L3Error};
use thiserror::Error;

/// Errors that can occur during grid processing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridProcessorError {
    /// The bounding box cannot select a window.
    #[error(transparent)]
    InvalidBoundingBox(#[from] BboxError),

    /// No axis entry falls inside the bounding box on at least one axis.
    #[error("{bbox:?} matches {lat_count} latitude rows and {lon_count} longitude columns")]
    EmptyRegion {
        bbox: BoundingBox,
        lat_count: usize,
        lon_count: usize,
    },

    /// Stride must be at least 1.
    #[error("stride must be at least 1, got {0}")]
    InvalidStride(usize),
}

impl GridProcessorError {
    /// Create an EmptyRegion error.
    pub fn empty_region(bbox: BoundingBox, lat_count: usize, lon_count: usize) -> Self {
        Self::EmptyRegion {
            bbox,
            lat_count,
            lon_count,
        }
    }
}

impl From<GridProcessorError> for L3Error {
    fn from(err: GridProcessorError) -> Self {
        match err {
            GridProcessorError::InvalidBoundingBox(e) => e.into(),
            GridProcessorError::EmptyRegion { .. } => L3Error::EmptyRegion(err.to_string()),
            GridProcessorError::InvalidStride(stride) => {
                L3Error::invalid_parameter("scaleFactor", format!("must be at least 1, got {}", stride))
            }
        }
    }
}

/// Result type for grid processor operations.
pub type Result<T> = std::result::Result<T, GridProcessorError>;
