//! Common types shared across the Level 3 retrieval crates.

pub mod bbox;
pub mod error;
pub mod grid;
pub mod time;

pub use bbox::{BboxError, BoundingBox};
pub use error::{L3Error, L3Result};
pub use grid::{GridShapeError, LatLonGrid, DEFAULT_FILL_VALUE};
pub use time::DatasetTimestamp;
