//! Common test utilities for level-three-api tests
//!
//! Provides an in-memory grid reader and a scratch dataset catalog so the
//! retrieval pipeline can run without NetCDF files on disk.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use base64::Engine;
use l3_common::LatLonGrid;
use level_three_api::config::ServiceConfig;
use level_three_api::retrieval::RetrievalService;
use level_three_api::state::AppState;
use netcdf_parser::{GridReader, NetCdfError, NetCdfResult};
use test_utils::{create_axis, create_grid_with, tempo_filename, DatasetDirs};

/// Grids keyed by file name. Unknown names fail like an unreadable file.
#[derive(Default)]
pub struct MemoryReader {
    grids: HashMap<String, LatLonGrid>,
}

impl MemoryReader {
    pub fn insert(&mut self, name: &str, grid: LatLonGrid) {
        self.grids.insert(name.to_string(), grid);
    }
}

impl GridReader for MemoryReader {
    fn read_grid(&self, path: &Path, _variable: &str) -> NetCdfResult<LatLonGrid> {
        let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
        self.grids
            .get(name)
            .cloned()
            .ok_or_else(|| NetCdfError::OpenFailed {
                path: path.to_path_buf(),
                message: "not a NetCDF file".to_string(),
            })
    }
}

/// A 5x5 grid over lat 30..=34, lon -90..=-86 holding
/// `offset + row * 1000 + col`.
pub fn offset_grid(offset: f64) -> LatLonGrid {
    create_grid_with(
        create_axis(30.0, 1.0, 5),
        create_axis(-90.0, 1.0, 5),
        move |row, col| offset + (row * 1000 + col) as f64,
    )
}

/// Scratch directories plus a reader that knows every file placed in them.
pub struct Fixture {
    pub dirs: DatasetDirs,
    pub reader: MemoryReader,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dirs: DatasetDirs::new(),
            reader: MemoryReader::default(),
        }
    }

    /// Publish a readable dataset into the primary directory.
    pub fn add_dataset(&mut self, stamp: &str, grid: LatLonGrid) -> String {
        let name = tempo_filename(stamp);
        self.dirs.add_primary(&name, b"");
        self.reader.insert(&name, grid);
        name
    }

    /// Publish a file the reader cannot open.
    pub fn add_unreadable(&mut self, stamp: &str) -> String {
        let name = tempo_filename(stamp);
        self.dirs.add_primary(&name, b"garbage");
        name
    }

    pub fn config(&self) -> ServiceConfig {
        ServiceConfig {
            primary_dir: self.dirs.primary(),
            fallback_dir: self.dirs.fallback(),
            ..ServiceConfig::default()
        }
    }

    /// Consume the fixture, keeping the directories alive alongside the service.
    pub fn into_service(self) -> (DatasetDirs, RetrievalService<MemoryReader>) {
        let config = self.config();
        (self.dirs, RetrievalService::from_config(&config, self.reader))
    }

    pub fn into_state(self) -> (DatasetDirs, Arc<AppState>) {
        let config = self.config();
        let state = AppState::with_reader(&config, Arc::new(self.reader));
        (self.dirs, Arc::new(state))
    }
}

/// Decode a base64 PNG and return its IHDR `(width, height)`.
pub fn png_dimensions(image_base64: &str) -> (u32, u32) {
    let png = base64::engine::general_purpose::STANDARD
        .decode(image_base64)
        .expect("image is valid base64");
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n", "missing PNG signature");
    assert_eq!(&png[12..16], b"IHDR");
    let width = u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
    let height = u32::from_be_bytes([png[20], png[21], png[22], png[23]]);
    (width, height)
}
