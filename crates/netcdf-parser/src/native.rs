//! Native NetCDF reading using the netcdf library.
//!
//! The netcdf library wraps libnetcdf/HDF5 and needs a real file path, so
//! datasets are always read straight from the catalog's directories.

use std::path::Path;
use std::sync::Once;
use std::time::Instant;

use l3_common::{LatLonGrid, DEFAULT_FILL_VALUE};
use tracing::debug;

use crate::error::{NetCdfError, NetCdfResult};
use crate::GridReader;

/// Name of the latitude coordinate variable.
pub const LATITUDE_VAR: &str = "latitude";

/// Name of the longitude coordinate variable.
pub const LONGITUDE_VAR: &str = "longitude";

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when errors
/// are handled gracefully by the Rust code (e.g., when checking for optional
/// attributes that don't exist). This creates confusing log spam like:
///
/// ```text
/// HDF5-DIAG: Error detected in HDF5 (1.10.8) thread 3:
///   #003: ../../../src/H5Adense.c line 397 in H5A__dense_open(): can't locate attribute in name index
/// ```
///
/// This function disables that output by calling H5Eset_auto2 with null handlers.
/// It only needs to be called once per process, but is safe to call multiple times.
///
/// Call it early in `main()`, before any HDF5/NetCDF operations occur.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Reads Level 3 products through libnetcdf.
///
/// Expects 1-D `latitude` and `longitude` variables and a 3-D product
/// variable shaped `[band, latitude, longitude]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeGridReader;

impl NativeGridReader {
    pub fn new() -> Self {
        silence_hdf5_errors();
        Self
    }
}

impl GridReader for NativeGridReader {
    fn read_grid(&self, path: &Path, variable: &str) -> NetCdfResult<LatLonGrid> {
        let start = Instant::now();

        // The handle closes on drop, so every early return below releases it.
        let file = netcdf::open(path).map_err(|e| NetCdfError::OpenFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let latitudes = read_axis(&file, path, LATITUDE_VAR)?;
        let longitudes = read_axis(&file, path, LONGITUDE_VAR)?;

        let var = file
            .variable(variable)
            .ok_or_else(|| NetCdfError::missing(path, format!("{} variable", variable)))?;

        let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
        if shape.len() != 3 {
            return Err(NetCdfError::invalid(
                path,
                format!("{} has {} dimensions, expected 3", variable, shape.len()),
            ));
        }
        if shape[1] != latitudes.len() || shape[2] != longitudes.len() {
            return Err(NetCdfError::invalid(
                path,
                format!(
                    "{} is {:?} but axes are {} x {}",
                    variable,
                    shape,
                    latitudes.len(),
                    longitudes.len()
                ),
            ));
        }

        let values: Vec<f64> = var
            .get_values::<f64, _>(..)
            .map_err(|e| NetCdfError::ReadFailed {
                path: path.to_path_buf(),
                variable: variable.to_string(),
                message: e.to_string(),
            })?;

        let fill_value = get_f64_attr(&var, "_FillValue").unwrap_or(DEFAULT_FILL_VALUE);

        debug!(
            path = %path.display(),
            variable,
            bands = shape[0],
            lat_count = latitudes.len(),
            lon_count = longitudes.len(),
            fill_value,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Read NetCDF grid"
        );

        LatLonGrid::new(latitudes, longitudes, values, fill_value).map_err(|source| {
            NetCdfError::Shape {
                path: path.to_path_buf(),
                source,
            }
        })
    }
}

// =============================================================================
// Internal helpers
// =============================================================================

fn read_axis(file: &netcdf::File, path: &Path, name: &str) -> NetCdfResult<Vec<f32>> {
    let var = file
        .variable(name)
        .ok_or_else(|| NetCdfError::missing(path, format!("{} variable", name)))?;

    if var.dimensions().len() != 1 {
        return Err(NetCdfError::invalid(
            path,
            format!("{} has {} dimensions, expected 1", name, var.dimensions().len()),
        ));
    }

    var.get_values::<f32, _>(..)
        .map_err(|e| NetCdfError::ReadFailed {
            path: path.to_path_buf(),
            variable: name.to_string(),
            message: e.to_string(),
        })
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// Helper to get f64 attribute.
fn get_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f64::try_from(attr_value).ok()
}
