//! Two-segment green → yellow → red color ramp.

use grid_processor::PercentileRange;

/// Opacity of every colored pixel (about 50%).
pub const ALPHA: u8 = 128;

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Packed `0xAARRGGBB`.
    pub fn to_argb(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

/// Color for a normalized value in `[0, 1]`.
///
/// 0 is pure green, 0.5 pure yellow, 1 pure red; channels are linear within
/// each half and rounded to the nearest integer.
pub fn gradient_color(normalized: f64) -> Color {
    let n = normalized.clamp(0.0, 1.0);
    let (r, g) = if n < 0.5 {
        (channel(n * 2.0), 255)
    } else {
        (255, channel(1.0 - (n - 0.5) * 2.0))
    };
    Color::new(r, g, 0, ALPHA)
}

/// Color for a grid value.
///
/// The fill value and non-finite values are transparent; everything else is
/// normalized against `range` and passed through [`gradient_color`].
pub fn colorize(value: f64, fill_value: f64, range: &PercentileRange) -> Color {
    if !is_renderable(value, fill_value) {
        return Color::transparent();
    }
    gradient_color(range.normalize(value))
}

#[inline]
fn is_renderable(value: f64, fill_value: f64) -> bool {
    value.is_finite() && value != fill_value && (value as f32) != (fill_value as f32)
}

#[inline]
fn channel(fraction: f64) -> u8 {
    (fraction * 255.0).round().clamp(0.0, 255.0) as u8
}
