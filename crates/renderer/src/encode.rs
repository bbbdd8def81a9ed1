//! PNG + base64 encoding of rendered rasters.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::error::RenderResult;
use crate::png::create_png_auto;
use crate::raster::RasterImage;

/// An encoded raster, as PNG bytes and as standard base64 text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub png: Vec<u8>,
    pub base64: String,
}

/// Encode `image` as PNG, then base64 (standard alphabet, padded, no line
/// breaks).
pub fn encode_image(image: &RasterImage) -> RenderResult<EncodedImage> {
    let png = create_png_auto(image.pixels(), image.width(), image.height())?;
    let base64 = BASE64.encode(&png);
    Ok(EncodedImage { png, base64 })
}
