//! In-memory gridded product on a 1-D latitude and 1-D longitude axis.

use crate::error::L3Error;

/// Reserved value marking a missing or invalid measurement.
pub const DEFAULT_FILL_VALUE: f64 = -1e30;

/// A 3-D product variable indexed `[band, lat, lon]` with its coordinate axes.
///
/// Values are stored band-major, then row-major over latitude. Only band 0 is
/// used by the retrieval pipeline.
#[derive(Debug, Clone)]
pub struct LatLonGrid {
    latitudes: Vec<f32>,
    longitudes: Vec<f32>,
    values: Vec<f64>,
    bands: usize,
    fill_value: f64,
}

impl LatLonGrid {
    /// Assemble a grid, checking that `values` holds a whole number of
    /// `latitudes.len() * longitudes.len()` bands.
    pub fn new(
        latitudes: Vec<f32>,
        longitudes: Vec<f32>,
        values: Vec<f64>,
        fill_value: f64,
    ) -> Result<Self, GridShapeError> {
        let plane = latitudes.len() * longitudes.len();
        if plane == 0 {
            return Err(GridShapeError::EmptyAxis {
                lat_len: latitudes.len(),
                lon_len: longitudes.len(),
            });
        }
        if values.is_empty() || values.len() % plane != 0 {
            return Err(GridShapeError::ValueCount {
                expected_multiple_of: plane,
                actual: values.len(),
            });
        }

        Ok(Self {
            bands: values.len() / plane,
            latitudes,
            longitudes,
            values,
            fill_value,
        })
    }

    pub fn latitudes(&self) -> &[f32] {
        &self.latitudes
    }

    pub fn longitudes(&self) -> &[f32] {
        &self.longitudes
    }

    /// Number of latitude rows.
    pub fn height(&self) -> usize {
        self.latitudes.len()
    }

    /// Number of longitude columns.
    pub fn width(&self) -> usize {
        self.longitudes.len()
    }

    pub fn bands(&self) -> usize {
        self.bands
    }

    pub fn fill_value(&self) -> f64 {
        self.fill_value
    }

    /// Value at `[band, lat_idx, lon_idx]`, or `None` outside the grid.
    pub fn get(&self, band: usize, lat_idx: usize, lon_idx: usize) -> Option<f64> {
        if band >= self.bands || lat_idx >= self.height() || lon_idx >= self.width() {
            return None;
        }
        let idx = (band * self.height() + lat_idx) * self.width() + lon_idx;
        self.values.get(idx).copied()
    }

    /// Band-0 value at `[lat_idx, lon_idx]`.
    #[inline]
    pub fn at(&self, lat_idx: usize, lon_idx: usize) -> Option<f64> {
        self.get(0, lat_idx, lon_idx)
    }

    /// Whether a value is a real sample rather than the fill sentinel.
    ///
    /// A fill value stored as `f32` does not widen to the exact `f64`
    /// constant, so both widths are compared.
    #[inline]
    pub fn is_valid(&self, value: f64) -> bool {
        value.is_finite()
            && value != self.fill_value
            && (value as f32) != (self.fill_value as f32)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridShapeError {
    #[error("grid axis is empty (latitude: {lat_len}, longitude: {lon_len})")]
    EmptyAxis { lat_len: usize, lon_len: usize },

    #[error("grid has {actual} values, expected a non-zero multiple of {expected_multiple_of}")]
    ValueCount {
        expected_multiple_of: usize,
        actual: usize,
    },
}

impl From<GridShapeError> for L3Error {
    fn from(err: GridShapeError) -> Self {
        L3Error::DatasetReadFailure(err.to_string())
    }
}
