//! Error types for rendering and encoding.

use l3_common::L3Error;
use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Error, Debug)]
pub enum RenderError {
    /// Pixel buffer does not match the stated image size.
    #[error("pixel buffer of {len} bytes does not fit a {width}x{height} image")]
    BufferSize {
        width: usize,
        height: usize,
        len: usize,
    },

    /// Zero-area images cannot be encoded.
    #[error("cannot encode an empty {width}x{height} image")]
    EmptyImage { width: usize, height: usize },

    /// IDAT compression failed.
    #[error("IDAT compression failed: {0}")]
    Compression(#[from] std::io::Error),
}

impl From<RenderError> for L3Error {
    fn from(err: RenderError) -> Self {
        L3Error::RenderError(err.to_string())
    }
}
