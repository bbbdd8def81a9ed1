//! Strided sampling for low-resolution full-grid previews.
//!
//! Every `stride`-th latitude row and longitude column is kept, starting at
//! index 0. No averaging or interpolation takes place; each output cell is
//! the sampled grid value.

use std::iter::StepBy;
use std::ops::Range;

use l3_common::LatLonGrid;
use tracing::debug;

use crate::error::{GridProcessorError, Result};

/// Geometry of a strided sample over a full grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StridedSample {
    pub stride: usize,
    pub grid_height: usize,
    pub grid_width: usize,
}

impl StridedSample {
    /// Fails with `InvalidStride` when `stride` is 0.
    pub fn new(grid_height: usize, grid_width: usize, stride: usize) -> Result<Self> {
        if stride == 0 {
            return Err(GridProcessorError::InvalidStride(stride));
        }
        Ok(Self {
            stride,
            grid_height,
            grid_width,
        })
    }

    /// Sample geometry covering all of `grid`.
    pub fn for_grid(grid: &LatLonGrid, stride: usize) -> Result<Self> {
        Self::new(grid.height(), grid.width(), stride)
    }

    /// Output image size as `(width, height)`: `ceil(width / stride)` by
    /// `ceil(height / stride)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (
            self.grid_width.div_ceil(self.stride),
            self.grid_height.div_ceil(self.stride),
        )
    }

    /// Sampled latitude indices.
    pub fn rows(&self) -> StepBy<Range<usize>> {
        (0..self.grid_height).step_by(self.stride)
    }

    /// Sampled longitude indices.
    pub fn cols(&self) -> StepBy<Range<usize>> {
        (0..self.grid_width).step_by(self.stride)
    }
}

/// Band-0 values at sampled positions that are real samples.
pub fn strided_valid_values(grid: &LatLonGrid, sample: &StridedSample) -> Vec<f64> {
    let (width, height) = sample.dimensions();
    let mut values = Vec::with_capacity(width * height);
    for lat in sample.rows() {
        for lon in sample.cols() {
            if let Some(v) = grid.at(lat, lon).filter(|&v| grid.is_valid(v)) {
                values.push(v);
            }
        }
    }
    debug!(
        stride = sample.stride,
        width,
        height,
        valid = values.len(),
        "Sampled grid at stride"
    );
    values
}
