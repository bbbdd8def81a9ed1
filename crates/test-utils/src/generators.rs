//! Synthetic axes and grids for tests.
//!
//! Values follow predictable patterns so a test can tell exactly which cell
//! ended up where.

use l3_common::{LatLonGrid, DEFAULT_FILL_VALUE};

/// Creates an evenly spaced axis of `n` values starting at `start`.
///
/// # Example
///
/// ```
/// use test_utils::create_axis;
///
/// let lats = create_axis(30.0, 0.5, 4);
/// assert_eq!(lats, vec![30.0, 30.5, 31.0, 31.5]);
/// ```
pub fn create_axis(start: f32, step: f32, n: usize) -> Vec<f32> {
    (0..n).map(|i| start + step * i as f32).collect()
}

/// Creates a single-band grid where each cell holds `row * 1000 + col`.
///
/// # Example
///
/// ```
/// use test_utils::{create_axis, create_index_grid};
///
/// let grid = create_index_grid(create_axis(0.0, 1.0, 3), create_axis(0.0, 1.0, 4));
/// assert_eq!(grid.at(2, 3), Some(2003.0));
/// ```
pub fn create_index_grid(latitudes: Vec<f32>, longitudes: Vec<f32>) -> LatLonGrid {
    create_grid_with(latitudes, longitudes, |row, col| (row * 1000 + col) as f64)
}

/// Creates a single-band grid from a per-cell function of `(row, col)`.
pub fn create_grid_with<F>(latitudes: Vec<f32>, longitudes: Vec<f32>, f: F) -> LatLonGrid
where
    F: Fn(usize, usize) -> f64,
{
    let mut values = Vec::with_capacity(latitudes.len() * longitudes.len());
    for row in 0..latitudes.len() {
        for col in 0..longitudes.len() {
            values.push(f(row, col));
        }
    }
    LatLonGrid::new(latitudes, longitudes, values, DEFAULT_FILL_VALUE)
        .expect("generator produced a consistent grid")
}

/// Creates a grid of NO2-column-like values (molecules/cm²) with a band of
/// fill cells along every seventh column.
///
/// Values rise from about 1e15 in the south-west to about 1e16 in the
/// north-east.
pub fn create_no2_grid(latitudes: Vec<f32>, longitudes: Vec<f32>) -> LatLonGrid {
    let height = latitudes.len().max(1) as f64;
    let width = longitudes.len().max(1) as f64;
    create_grid_with(latitudes, longitudes, |row, col| {
        if col % 7 == 6 {
            DEFAULT_FILL_VALUE
        } else {
            1.0e15 + 9.0e15 * (row as f64 / height + col as f64 / width) / 2.0
        }
    })
}
