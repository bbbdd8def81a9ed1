//! Latitude/longitude bounding boxes.

use serde::{Deserialize, Serialize};

/// An inclusive geographic bounding box in degrees.
///
/// Field order follows the request parameters (`lat1, lat2, lon1, lon2`);
/// `lat1`/`lon1` are the lower bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lat1: f32,
    pub lat2: f32,
    pub lon1: f32,
    pub lon2: f32,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(lat1: f32, lat2: f32, lon1: f32, lon2: f32) -> Self {
        Self {
            lat1,
            lat2,
            lon1,
            lon2,
        }
    }

    /// Reject boxes that cannot select a rectangular window.
    ///
    /// Equal bounds are legal and select a single row or column.
    pub fn validate(&self) -> Result<(), BboxError> {
        let bounds = [self.lat1, self.lat2, self.lon1, self.lon2];
        if bounds.iter().any(|v| !v.is_finite()) {
            return Err(BboxError::NonFinite(*self));
        }
        if self.lat1 > self.lat2 {
            return Err(BboxError::InvertedLatitude {
                lat1: self.lat1,
                lat2: self.lat2,
            });
        }
        if self.lon1 > self.lon2 {
            return Err(BboxError::InvertedLongitude {
                lon1: self.lon1,
                lon2: self.lon2,
            });
        }
        Ok(())
    }

    /// Check if a latitude lies inside `[lat1, lat2]`.
    #[inline]
    pub fn contains_lat(&self, lat: f32) -> bool {
        lat >= self.lat1 && lat <= self.lat2
    }

    /// Check if a longitude lies inside `[lon1, lon2]`.
    #[inline]
    pub fn contains_lon(&self, lon: f32) -> bool {
        lon >= self.lon1 && lon <= self.lon2
    }

    /// Check if a point is contained within this bbox.
    pub fn contains_point(&self, lat: f32, lon: f32) -> bool {
        self.contains_lat(lat) && self.contains_lon(lon)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BboxError {
    #[error("bounding box has a non-finite bound: {0:?}")]
    NonFinite(BoundingBox),

    #[error("lat1 ({lat1}) is greater than lat2 ({lat2})")]
    InvertedLatitude { lat1: f32, lat2: f32 },

    #[error("lon1 ({lon1}) is greater than lon2 ({lon2})")]
    InvertedLongitude { lon1: f32, lon2: f32 },
}
