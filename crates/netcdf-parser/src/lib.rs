//! NetCDF reader for TEMPO Level 3 gridded products.
//!
//! A Level 3 file carries 1-D `latitude` and `longitude` axes and one or more
//! 3-D product variables indexed `[band, latitude, longitude]`, for example
//! `vertical_column_total` (NO2 column, molecules/cm²). Missing cells hold the
//! variable's `_FillValue`, conventionally `-1e30`.
//!
//! Reading goes through the [`GridReader`] trait so callers can substitute an
//! in-memory source in tests.

pub mod error;
pub mod native;

use std::path::Path;

use l3_common::LatLonGrid;

pub use error::{NetCdfError, NetCdfResult};
pub use native::{silence_hdf5_errors, NativeGridReader, LATITUDE_VAR, LONGITUDE_VAR};

/// Source of gridded products.
///
/// Implementations open the file, copy out the axes and the named variable,
/// and release the file before returning.
pub trait GridReader: Send + Sync {
    fn read_grid(&self, path: &Path, variable: &str) -> NetCdfResult<LatLonGrid>;
}

impl<T: GridReader + ?Sized> GridReader for std::sync::Arc<T> {
    fn read_grid(&self, path: &Path, variable: &str) -> NetCdfResult<LatLonGrid> {
        (**self).read_grid(path, variable)
    }
}
