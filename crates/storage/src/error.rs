//! Error types for dataset storage.

use std::path::PathBuf;

use l3_common::L3Error;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Error, Debug)]
pub enum StorageError {
    /// Neither directory holds a dataset file.
    #[error("no dataset files found in {primary:?} or {fallback:?}")]
    NoDataAvailable { primary: PathBuf, fallback: PathBuf },

    /// A directory exists but could not be listed.
    #[error("failed to list {path:?}: {message}")]
    ListFailed { path: PathBuf, message: String },
}

impl From<StorageError> for L3Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NoDataAvailable { .. } => L3Error::NoDataAvailable(err.to_string()),
            StorageError::ListFailed { .. } => L3Error::InternalError(err.to_string()),
        }
    }
}
