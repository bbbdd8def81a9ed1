//! Bounding-box windows over 1-D coordinate axes.
//!
//! Each axis is scanned on its own. Level 3 grids are separable (every
//! latitude row shares one longitude axis), so a latitude run and a
//! longitude run describe the rectangular window completely.

use std::ops::Range;

use l3_common::{BoundingBox, LatLonGrid};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{GridProcessorError, Result};

/// Contiguous run of axis indices selected by a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionWindow {
    pub first_lat: usize,
    pub lat_count: usize,
    pub first_lon: usize,
    pub lon_count: usize,
}

impl RegionWindow {
    /// Latitude indices covered by the window.
    pub fn lat_range(&self) -> Range<usize> {
        self.first_lat..self.first_lat + self.lat_count
    }

    /// Longitude indices covered by the window.
    pub fn lon_range(&self) -> Range<usize> {
        self.first_lon..self.first_lon + self.lon_count
    }

    /// Midpoint offset `(lat_count / 2, lon_count / 2)` relative to the window origin.
    pub fn center_offset(&self) -> (usize, usize) {
        (self.lat_count / 2, self.lon_count / 2)
    }

    /// Absolute grid indices of the midpoint cell.
    pub fn center_index(&self) -> (usize, usize) {
        let (lat, lon) = self.center_offset();
        (self.first_lat + lat, self.first_lon + lon)
    }

    /// Rendered image size as `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.lon_count, self.lat_count)
    }
}

/// Compute the window of `latitudes` x `longitudes` inside `bbox`.
///
/// Membership is inclusive on both ends. Fails with `InvalidBoundingBox` for
/// inverted or non-finite bounds and `EmptyRegion` when either axis has no
/// entry inside the box.
pub fn extract_region(
    latitudes: &[f32],
    longitudes: &[f32],
    bbox: &BoundingBox,
) -> Result<RegionWindow> {
    bbox.validate()?;

    let (first_lat, lat_count) = axis_run(latitudes, |v| bbox.contains_lat(v), "latitude");
    let (first_lon, lon_count) = axis_run(longitudes, |v| bbox.contains_lon(v), "longitude");

    let (Some(first_lat), Some(first_lon)) = (first_lat, first_lon) else {
        return Err(GridProcessorError::empty_region(*bbox, lat_count, lon_count));
    };

    let window = RegionWindow {
        first_lat,
        lat_count,
        first_lon,
        lon_count,
    };
    debug!(
        first_lat,
        lat_count,
        first_lon,
        lon_count,
        "Extracted region window"
    );
    Ok(window)
}

/// Band-0 values inside `window` that are real samples, row by row.
pub fn window_valid_values(grid: &LatLonGrid, window: &RegionWindow) -> Vec<f64> {
    let mut values = Vec::with_capacity(window.lat_count * window.lon_count);
    for lat in window.lat_range() {
        for lon in window.lon_range() {
            if let Some(v) = grid.at(lat, lon).filter(|&v| grid.is_valid(v)) {
                values.push(v);
            }
        }
    }
    values
}

/// First matching index and the number of matches on one axis.
fn axis_run(axis: &[f32], inside: impl Fn(f32) -> bool, name: &str) -> (Option<usize>, usize) {
    let mut first = None;
    let mut last = 0;
    let mut count = 0;

    for (idx, &value) in axis.iter().enumerate() {
        if inside(value) {
            first.get_or_insert(idx);
            last = idx;
            count += 1;
        }
    }

    if let Some(first) = first {
        if last - first + 1 != count {
            warn!(
                axis = name,
                first,
                last,
                count,
                "Axis entries inside the bounding box are not contiguous"
            );
        }
    }

    (first, count)
}
