//! Percentile clipping ranges for color scaling.
//!
//! The product occasionally reports spuriously large columns, so the visible
//! color range runs from the 5th to the 95th percentile of the valid samples
//! rather than from the true extremes.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lower clipping percentile.
pub const LOWER_PERCENTILE: f64 = 0.05;

/// Upper clipping percentile.
pub const UPPER_PERCENTILE: f64 = 0.95;

/// Value range used to normalize samples before coloring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileRange {
    pub min: f64,
    pub max: f64,
}

impl PercentileRange {
    /// Range used when there are no valid samples.
    pub const EMPTY: Self = Self { min: 0.0, max: 1.0 };

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Map `value` into `[0, 1]`. A zero-width range maps everything to 0.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 || !span.is_finite() {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

impl Default for PercentileRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Compute the 5th/95th percentile range of `values`.
///
/// Indices are `floor(n * 0.05)` and `floor(n * 0.95)` into the ascending
/// sort, so a single sample yields `min == max`. An empty input yields
/// `(0, 1)`. Callers pass only valid samples.
pub fn percentile_range(mut values: Vec<f64>) -> PercentileRange {
    if values.is_empty() {
        debug!("No valid samples, using default range");
        return PercentileRange::EMPTY;
    }

    values.sort_by(f64::total_cmp);

    let n = values.len();
    let lower = percentile_index(n, LOWER_PERCENTILE);
    let upper = percentile_index(n, UPPER_PERCENTILE);
    let range = PercentileRange::new(values[lower], values[upper]);

    debug!(
        samples = n,
        min = range.min,
        max = range.max,
        "Computed percentile range"
    );
    range
}

#[inline]
fn percentile_index(n: usize, fraction: f64) -> usize {
    ((n as f64 * fraction) as usize).min(n - 1)
}
