//! Common test fixtures for Level 3 retrieval tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Common bounding boxes as `(lat1, lat2, lon1, lon2)`.
pub mod bbox {
    /// Roughly the TEMPO field of regard over North America.
    pub const TEMPO_FOR: (f32, f32, f32, f32) = (17.0, 63.0, -140.0, -50.0);

    /// Eastern United States.
    pub const EASTERN_US: (f32, f32, f32, f32) = (30.0, 45.0, -90.0, -75.0);

    /// Single point (degenerate bbox)
    pub const POINT: (f32, f32, f32, f32) = (40.0, 40.0, -80.0, -80.0);

    /// Southern hemisphere, outside the TEMPO field of regard.
    pub const OUTSIDE: (f32, f32, f32, f32) = (-40.0, -30.0, 10.0, 20.0);
}

/// Builds a TEMPO-style filename carrying the given `YYYYMMDDTHHMMSS` stamp.
///
/// ```
/// use test_utils::tempo_filename;
///
/// assert_eq!(
///     tempo_filename("20251003T231130"),
///     "TEMPO_NO2_L3_V03_20251003T231130Z_S012.nc"
/// );
/// ```
pub fn tempo_filename(stamp: &str) -> String {
    format!("TEMPO_NO2_L3_V03_{}Z_S012.nc", stamp)
}

/// A scratch primary/fallback directory pair, removed on drop.
pub struct DatasetDirs {
    root: TempDir,
}

impl DatasetDirs {
    /// Create both directories.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        fs::create_dir_all(root.path().join("primary")).expect("create primary dir");
        fs::create_dir_all(root.path().join("fallback")).expect("create fallback dir");
        Self { root }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn primary(&self) -> PathBuf {
        self.root.path().join("primary")
    }

    pub fn fallback(&self) -> PathBuf {
        self.root.path().join("fallback")
    }

    /// Write a file into the primary directory and return its path.
    pub fn add_primary(&self, name: &str, contents: &[u8]) -> PathBuf {
        write_file(&self.primary(), name, contents)
    }

    /// Write a file into the fallback directory and return its path.
    pub fn add_fallback(&self, name: &str, contents: &[u8]) -> PathBuf {
        write_file(&self.fallback(), name, contents)
    }
}

impl Default for DatasetDirs {
    fn default() -> Self {
        Self::new()
    }
}

fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture file");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_dirs_layout() {
        let dirs = DatasetDirs::new();
        assert!(dirs.primary().is_dir());
        assert!(dirs.fallback().is_dir());

        let path = dirs.add_primary("a.nc", b"x");
        assert_eq!(path, dirs.primary().join("a.nc"));
        assert!(path.is_file());
    }
}
