//! Storage abstractions for Level 3 retrieval.
//!
//! Datasets live as plain files in two directories: the primary directory,
//! populated on a schedule by an external producer, and a fallback directory
//! shipped with the deployment. The catalog rescans both on every call.

pub mod catalog;
pub mod error;

pub use catalog::{DatasetFile, FileCatalog};
pub use error::{StorageError, StorageResult};
