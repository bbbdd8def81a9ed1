//! Tests for the color ramp.

use grid_processor::PercentileRange;
use l3_common::DEFAULT_FILL_VALUE;
use renderer::gradient::{colorize, gradient_color, Color, ALPHA};

// ============================================================================
// Fixed points
// ============================================================================

#[test]
fn test_tri_point_colors() {
    assert_eq!(gradient_color(0.0), Color::new(0, 255, 0, ALPHA));
    assert_eq!(gradient_color(0.5), Color::new(255, 255, 0, ALPHA));
    assert_eq!(gradient_color(1.0), Color::new(255, 0, 0, ALPHA));
}

#[test]
fn test_alpha_is_constant_for_valid_values() {
    let range = PercentileRange::new(1.0e15, 5.0e15);
    for v in [-1.0e20, 0.0, 1.0e15, 3.0e15, 5.0e15, 1.0e22] {
        assert_eq!(colorize(v, DEFAULT_FILL_VALUE, &range).a, 128);
    }
}

#[test]
fn test_blue_is_always_zero() {
    for i in 0..=100 {
        assert_eq!(gradient_color(i as f64 / 100.0).b, 0);
    }
}

// ============================================================================
// Range handling
// ============================================================================

#[test]
fn test_values_outside_range_clamp_to_ends() {
    let range = PercentileRange::new(10.0, 20.0);
    assert_eq!(colorize(-5.0, DEFAULT_FILL_VALUE, &range), gradient_color(0.0));
    assert_eq!(colorize(500.0, DEFAULT_FILL_VALUE, &range), gradient_color(1.0));
}

#[test]
fn test_zero_width_range_renders_green() {
    let range = PercentileRange::new(3.0, 3.0);
    assert_eq!(colorize(3.0, DEFAULT_FILL_VALUE, &range), Color::new(0, 255, 0, ALPHA));
    assert_eq!(colorize(9.0, DEFAULT_FILL_VALUE, &range), Color::new(0, 255, 0, ALPHA));
}

#[test]
fn test_fill_value_transparent_regardless_of_range() {
    for range in [
        PercentileRange::new(0.0, 1.0),
        PercentileRange::new(-1.0e31, 0.0),
        PercentileRange::new(5.0, 5.0),
    ] {
        assert_eq!(colorize(DEFAULT_FILL_VALUE, DEFAULT_FILL_VALUE, &range).a, 0);
    }
}

#[test]
fn test_custom_fill_value() {
    let range = PercentileRange::new(0.0, 10.0);
    assert_eq!(colorize(-999.0, -999.0, &range).a, 0);
    // The default sentinel is an ordinary (very small) value under another fill.
    assert_eq!(colorize(DEFAULT_FILL_VALUE, -999.0, &range), gradient_color(0.0));
}

// ============================================================================
// Monotonicity
// ============================================================================

#[test]
fn test_lower_half_red_rises_green_fixed() {
    let mut prev = gradient_color(0.0);
    for i in 1..50 {
        let c = gradient_color(i as f64 / 100.0);
        assert!(c.r >= prev.r, "red fell at {}", i);
        assert_eq!(c.g, 255);
        prev = c;
    }
}

#[test]
fn test_upper_half_green_falls_red_fixed() {
    let mut prev = gradient_color(0.5);
    for i in 51..=100 {
        let c = gradient_color(i as f64 / 100.0);
        assert!(c.g <= prev.g, "green rose at {}", i);
        assert_eq!(c.r, 255);
        prev = c;
    }
}

#[test]
fn test_monotonic_in_value() {
    let range = PercentileRange::new(1.0e15, 9.0e15);
    let values: Vec<f64> = (0..=80).map(|i| 1.0e15 + i as f64 * 1.0e14).collect();
    for pair in values.windows(2) {
        let a = colorize(pair[0], DEFAULT_FILL_VALUE, &range);
        let b = colorize(pair[1], DEFAULT_FILL_VALUE, &range);
        assert!(b.r >= a.r);
        assert!(b.g <= a.g);
    }
}
