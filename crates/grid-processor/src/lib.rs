//! Grid processing for Level 3 products.
//!
//! This crate turns a [`LatLonGrid`](l3_common::LatLonGrid) and a request
//! into the cells to render:
//!
//! - **Region windows**: the contiguous index run of each axis inside a
//!   bounding box, plus the window's midpoint cell
//! - **Strided samples**: every N-th row and column of the full grid for
//!   low-resolution previews
//! - **Percentile ranges**: 5th/95th percentile clipping of the valid samples
//!
//! # Example
//!
//! ```ignore
//! use grid_processor::{extract_region, percentile_range, window_valid_values};
//!
//! let window = extract_region(grid.latitudes(), grid.longitudes(), &bbox)?;
//! let range = percentile_range(window_valid_values(&grid, &window));
//! ```

pub mod downsample;
pub mod error;
pub mod region;
pub mod stats;

// Re-export commonly used types at crate root
pub use downsample::{strided_valid_values, StridedSample};
pub use error::{GridProcessorError, Result};
pub use region::{extract_region, window_valid_values, RegionWindow};
pub use stats::{percentile_range, PercentileRange};
