//! Tests for PNG encoding and base64 payloads.
//!
//! Encoded files are checked structurally: signature, chunk CRCs, header
//! fields, and the inflated scanlines.

use std::io::Read;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use renderer::encode::encode_image;
use renderer::gradient::{gradient_color, Color};
use renderer::png::{create_png, create_png_auto};
use renderer::raster::RasterImage;

// ============================================================================
// Helper functions
// ============================================================================

const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Split a PNG into `(type, data)` chunks, checking every CRC.
fn chunks(png: &[u8]) -> Vec<([u8; 4], Vec<u8>)> {
    assert_eq!(&png[..8], &SIGNATURE);
    let mut out = Vec::new();
    let mut pos = 8;
    while pos < png.len() {
        let len = u32::from_be_bytes(png[pos..pos + 4].try_into().unwrap()) as usize;
        let kind: [u8; 4] = png[pos + 4..pos + 8].try_into().unwrap();
        let data = png[pos + 8..pos + 8 + len].to_vec();
        let crc = u32::from_be_bytes(png[pos + 8 + len..pos + 12 + len].try_into().unwrap());

        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&kind);
        hasher.update(&data);
        assert_eq!(hasher.finalize(), crc, "bad CRC on {:?}", kind);

        out.push((kind, data));
        pos += 12 + len;
    }
    out
}

fn find<'a>(chunks: &'a [([u8; 4], Vec<u8>)], kind: &[u8; 4]) -> Option<&'a Vec<u8>> {
    chunks.iter().find(|(k, _)| k == kind).map(|(_, d)| d)
}

fn inflate(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    flate2::read::ZlibDecoder::new(data).read_to_end(&mut out).unwrap();
    out
}

fn gradient_image(width: usize, height: usize, steps: usize) -> RasterImage {
    let mut image = RasterImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let n = ((x + y) % steps) as f64 / (steps - 1) as f64;
            image.set_pixel(x, y, gradient_color(n));
        }
    }
    image
}

// ============================================================================
// Format selection tests
// ============================================================================

#[test]
fn test_few_colors_use_indexed_with_trns() {
    let mut image = gradient_image(8, 4, 5);
    image.set_pixel(0, 0, Color::transparent());

    let png = create_png_auto(image.pixels(), 8, 4).unwrap();
    let chunks = chunks(&png);

    let ihdr = find(&chunks, b"IHDR").unwrap();
    assert_eq!(u32::from_be_bytes(ihdr[0..4].try_into().unwrap()), 8);
    assert_eq!(u32::from_be_bytes(ihdr[4..8].try_into().unwrap()), 4);
    assert_eq!(ihdr[9], 3, "expected indexed color type");

    let plte = find(&chunks, b"PLTE").unwrap();
    let trns = find(&chunks, b"tRNS").unwrap();
    assert_eq!(plte.len() / 3, trns.len());
    assert!(trns.contains(&0));
    assert!(trns.contains(&128));

    // One filter byte plus one index per pixel on each row.
    let raw = inflate(find(&chunks, b"IDAT").unwrap());
    assert_eq!(raw.len(), 4 * (1 + 8));
}

#[test]
fn test_many_colors_fall_back_to_rgba() {
    let mut pixels = Vec::with_capacity(300 * 4);
    for i in 0..300u32 {
        pixels.extend_from_slice(&[(i % 256) as u8, (i / 256) as u8, 0, 128]);
    }

    let png = create_png_auto(&pixels, 300, 1).unwrap();
    let chunks = chunks(&png);
    assert_eq!(find(&chunks, b"IHDR").unwrap()[9], 6);
    assert!(find(&chunks, b"PLTE").is_none());

    let raw = inflate(find(&chunks, b"IDAT").unwrap());
    assert_eq!(raw[0], 0);
    assert_eq!(&raw[1..], pixels.as_slice());
}

#[test]
fn test_rgba_scanlines_round_trip() {
    let image = gradient_image(5, 3, 4);
    let png = create_png(image.pixels(), 5, 3).unwrap();
    let chunks = chunks(&png);

    let raw = inflate(find(&chunks, b"IDAT").unwrap());
    for (row, line) in raw.chunks_exact(1 + 5 * 4).enumerate() {
        assert_eq!(line[0], 0, "filter byte on row {}", row);
        assert_eq!(&line[1..], &image.pixels()[row * 20..(row + 1) * 20]);
    }
    assert_eq!(chunks.last().unwrap().0, *b"IEND");
}

#[test]
fn test_large_image_uses_parallel_palette() {
    // 100 x 100 = 10000 pixels, above the parallel threshold.
    let image = gradient_image(100, 100, 20);
    let png = create_png_auto(image.pixels(), 100, 100).unwrap();
    let chunks = chunks(&png);
    assert_eq!(find(&chunks, b"IHDR").unwrap()[9], 3);
    assert_eq!(find(&chunks, b"PLTE").unwrap().len(), 20 * 3);
}

// ============================================================================
// Base64 payload tests
// ============================================================================

#[test]
fn test_encode_image_payload() {
    let image = gradient_image(6, 10, 3);
    let encoded = encode_image(&image).unwrap();

    assert_eq!(&encoded.png[..8], &SIGNATURE);
    assert_eq!(BASE64.decode(encoded.base64.as_bytes()).unwrap(), encoded.png);
    assert!(encoded
        .base64
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'='));
}
