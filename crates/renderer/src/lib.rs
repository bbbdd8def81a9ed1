//! Image rendering for Level 3 product grids.
//!
//! - [`gradient`]: the green → yellow → red color ramp at 50% opacity
//! - [`raster`]: one-pixel-per-cell rasterization of region windows and
//!   strided samples, vertically flipped
//! - [`png`]: indexed/RGBA PNG encoder
//! - [`encode`]: PNG + base64 payloads

pub mod encode;
pub mod error;
pub mod gradient;
pub mod png;
pub mod raster;

pub use encode::{encode_image, EncodedImage};
pub use error::{RenderError, RenderResult};
pub use gradient::{colorize, gradient_color, Color, ALPHA};
pub use raster::{render_region, render_strided, RasterImage, RegionRaster};
