//! Application state for the Level 3 API.

use std::sync::Arc;

use netcdf_parser::{GridReader, NativeGridReader};

use crate::config::ServiceConfig;
use crate::retrieval::RetrievalService;

/// Grid reader shared across request handlers.
pub type SharedReader = Arc<dyn GridReader>;

/// Shared application state.
pub struct AppState {
    /// Retrieval pipeline; runs on the blocking pool.
    pub retrieval: Arc<RetrievalService<SharedReader>>,

    /// Stride for full-grid requests that do not give one.
    pub default_stride: usize,
}

impl AppState {
    /// State backed by the native NetCDF reader.
    pub fn new(config: &ServiceConfig) -> Self {
        Self::with_reader(config, Arc::new(NativeGridReader::new()))
    }

    /// State backed by any reader.
    pub fn with_reader(config: &ServiceConfig, reader: SharedReader) -> Self {
        Self {
            retrieval: Arc::new(RetrievalService::from_config(config, reader)),
            default_stride: config.default_stride,
        }
    }
}
