//! Rasterization of region windows and strided samples.
//!
//! Grid row 0 is the first matched latitude. Rows are written bottom-up
//! (grid row `i` lands on pixel row `height - 1 - i`), so on an ascending
//! latitude axis north is at the top of the image. Columns map straight
//! across.

use grid_processor::{PercentileRange, RegionWindow, StridedSample};
use l3_common::LatLonGrid;
use tracing::debug;

use crate::gradient::{colorize, Color};

/// RGBA pixel buffer, row-major from the top row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// A fully transparent image.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, with `y = 0` the top row.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        let p = &self.pixels[i..i + 4];
        Some(Color::new(p[0], p[1], p[2], p[3]))
    }

    /// Write a pixel. Returns false, leaving the image untouched, when
    /// `(x, y)` is outside the image.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let i = (y * self.width + x) * 4;
        self.pixels[i..i + 4].copy_from_slice(&color.to_rgba());
        true
    }
}

/// A rendered bounding-box window.
#[derive(Debug, Clone)]
pub struct RegionRaster {
    pub image: RasterImage,
    /// Raw grid value at the window midpoint, fill value included.
    pub center_value: f64,
}

/// Render the cells of `window`, one pixel per cell.
pub fn render_region(
    grid: &LatLonGrid,
    window: &RegionWindow,
    range: &PercentileRange,
) -> RegionRaster {
    let (width, height) = window.dimensions();
    let mut image = RasterImage::new(width, height);
    let (center_row, center_col) = window.center_offset();
    let mut center_value = grid.fill_value();

    for (row, lat) in window.lat_range().enumerate() {
        for (col, lon) in window.lon_range().enumerate() {
            let Some(value) = grid.at(lat, lon) else {
                continue;
            };
            if row == center_row && col == center_col {
                center_value = value;
            }
            image.set_pixel(col, height - 1 - row, colorize(value, grid.fill_value(), range));
        }
    }

    debug!(width, height, center_value, "Rendered region window");
    RegionRaster {
        image,
        center_value,
    }
}

/// Render a strided sample of the whole grid, one pixel per sampled cell.
pub fn render_strided(
    grid: &LatLonGrid,
    sample: &StridedSample,
    range: &PercentileRange,
) -> RasterImage {
    let (width, height) = sample.dimensions();
    let mut image = RasterImage::new(width, height);
    let stride = sample.stride;

    for lat in sample.rows() {
        for lon in sample.cols() {
            let Some(value) = grid.at(lat, lon) else {
                continue;
            };
            let x = lon / stride;
            let Some(y) = height.checked_sub(lat / stride + 1) else {
                continue;
            };
            image.set_pixel(x, y, colorize(value, grid.fill_value(), range));
        }
    }

    debug!(width, height, stride, "Rendered strided sample");
    image
}
