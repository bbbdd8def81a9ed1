//! Retrieval pipeline: catalog → reader → window or stride → range → raster → PNG.
//!
//! Every call rescans the catalog and reads each file it needs from scratch.
//! Nothing is cached between calls. A failure on any file aborts the whole
//! call, including multi-file calls.

use std::path::Path;
use std::time::Instant;

use grid_processor::{
    extract_region, percentile_range, strided_valid_values, window_valid_values, StridedSample,
};
use l3_common::{BoundingBox, L3Error, L3Result};
use netcdf_parser::GridReader;
use renderer::{encode_image, render_region, render_strided};
use serde::Serialize;
use storage::{DatasetFile, FileCatalog};
use tracing::{debug, info};

use crate::config::ServiceConfig;

/// Center value reported for full-grid retrievals.
pub const CENTER_NOT_COMPUTED: f64 = -1.0;

/// Result of one retrieval over one dataset file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelThreeData {
    pub min_value: f64,
    pub max_value: f64,
    pub center_value: f64,
    /// Base64 of the PNG image.
    pub image_base64: String,
}

/// Runs retrievals against a file catalog with a pluggable grid reader.
pub struct RetrievalService<R> {
    catalog: FileCatalog,
    reader: R,
    variable: String,
}

impl<R: GridReader> RetrievalService<R> {
    pub fn new(catalog: FileCatalog, reader: R, variable: impl Into<String>) -> Self {
        Self {
            catalog,
            reader,
            variable: variable.into(),
        }
    }

    /// Build from service configuration.
    pub fn from_config(config: &ServiceConfig, reader: R) -> Self {
        let catalog = FileCatalog::new(
            &config.primary_dir,
            &config.fallback_dir,
            &config.file_extension,
        );
        Self::new(catalog, reader, &config.variable)
    }

    /// Render `bbox` from the newest dataset.
    pub fn retrieve_latest_region(&self, bbox: &BoundingBox) -> L3Result<LevelThreeData> {
        info!(?bbox, "Retrieving latest region");
        bbox.validate()?;

        let files = self.catalog.list_files()?;
        let latest = newest(&files)?;
        self.region_from_file(latest, bbox)
    }

    /// Render `bbox` from each of the `n` newest datasets, newest first.
    ///
    /// Returns fewer than `n` results when the catalog holds fewer files.
    pub fn retrieve_n_latest_regions(
        &self,
        bbox: &BoundingBox,
        n: usize,
    ) -> L3Result<Vec<LevelThreeData>> {
        info!(?bbox, n, "Retrieving latest regions");
        bbox.validate()?;

        let files = self.catalog.list_files()?;
        log_truncation(n, files.len());

        files
            .iter()
            .take(n)
            .map(|file| self.region_from_file(file, bbox))
            .collect()
    }

    /// Render the newest dataset at `stride`.
    pub fn retrieve_latest_full(&self, stride: usize) -> L3Result<LevelThreeData> {
        info!(stride, "Retrieving latest full grid");
        check_stride(stride)?;

        let files = self.catalog.list_files()?;
        let latest = newest(&files)?;
        self.full_from_file(latest, stride)
    }

    /// Render each of the `n` newest datasets at `stride`, newest first.
    pub fn retrieve_n_latest_full(&self, n: usize, stride: usize) -> L3Result<Vec<LevelThreeData>> {
        info!(n, stride, "Retrieving latest full grids");
        check_stride(stride)?;

        let files = self.catalog.list_files()?;
        log_truncation(n, files.len());

        files
            .iter()
            .take(n)
            .map(|file| self.full_from_file(file, stride))
            .collect()
    }

    fn region_from_file(&self, file: &DatasetFile, bbox: &BoundingBox) -> L3Result<LevelThreeData> {
        let start = Instant::now();
        let grid = self.read(&file.path)?;

        let window = extract_region(grid.latitudes(), grid.longitudes(), bbox)?;
        let range = percentile_range(window_valid_values(&grid, &window));
        let raster = render_region(&grid, &window, &range);
        let encoded = encode_image(&raster.image)?;

        debug!(
            file = file.file_name(),
            observed_at = ?file.timestamp.to_datetime(),
            min = range.min,
            max = range.max,
            center = raster.center_value,
            png_bytes = encoded.png.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Rendered region"
        );

        Ok(LevelThreeData {
            min_value: range.min,
            max_value: range.max,
            center_value: raster.center_value,
            image_base64: encoded.base64,
        })
    }

    fn full_from_file(&self, file: &DatasetFile, stride: usize) -> L3Result<LevelThreeData> {
        let start = Instant::now();
        let grid = self.read(&file.path)?;

        let sample = StridedSample::for_grid(&grid, stride)?;
        let range = percentile_range(strided_valid_values(&grid, &sample));
        let image = render_strided(&grid, &sample, &range);
        let encoded = encode_image(&image)?;

        debug!(
            file = file.file_name(),
            observed_at = ?file.timestamp.to_datetime(),
            width = image.width(),
            height = image.height(),
            min = range.min,
            max = range.max,
            png_bytes = encoded.png.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Rendered full grid"
        );

        Ok(LevelThreeData {
            min_value: range.min,
            max_value: range.max,
            center_value: CENTER_NOT_COMPUTED,
            image_base64: encoded.base64,
        })
    }

    fn read(&self, path: &Path) -> L3Result<l3_common::LatLonGrid> {
        debug!(path = %path.display(), variable = %self.variable, "Reading dataset");
        Ok(self.reader.read_grid(path, &self.variable)?)
    }
}

fn newest(files: &[DatasetFile]) -> L3Result<&DatasetFile> {
    files
        .first()
        .ok_or_else(|| L3Error::NoDataAvailable("catalog is empty".to_string()))
}

fn check_stride(stride: usize) -> L3Result<()> {
    if stride == 0 {
        return Err(L3Error::invalid_parameter("scaleFactor", "must be at least 1"));
    }
    Ok(())
}

fn log_truncation(requested: usize, available: usize) {
    if requested > available {
        info!(
            requested,
            available, "Fewer datasets than requested, returning all available"
        );
    }
}
