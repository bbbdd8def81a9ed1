//! Dataset file catalog backed by directory scans.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use l3_common::DatasetTimestamp;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{StorageError, StorageResult};

/// A dataset file visible to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetFile {
    pub path: PathBuf,
    pub timestamp: DatasetTimestamp,
}

impl DatasetFile {
    fn from_path(path: PathBuf) -> Self {
        let timestamp = file_name(&path)
            .map(DatasetTimestamp::from_filename)
            .unwrap_or_default();
        Self { path, timestamp }
    }

    /// Final path component, or an empty string for odd paths.
    pub fn file_name(&self) -> &str {
        file_name(&self.path).unwrap_or("")
    }
}

/// Lists dataset files from a primary and a fallback directory.
///
/// There is no standing index: every call rescans both directories, so the
/// newest file published by the producer is always seen.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    primary_dir: PathBuf,
    fallback_dir: PathBuf,
    extension: String,
}

impl FileCatalog {
    /// Create a catalog. `extension` is given without the leading dot.
    pub fn new(
        primary_dir: impl Into<PathBuf>,
        fallback_dir: impl Into<PathBuf>,
        extension: impl Into<String>,
    ) -> Self {
        let extension = extension.into();
        Self {
            primary_dir: primary_dir.into(),
            fallback_dir: fallback_dir.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// All dataset files, newest first.
    ///
    /// A filename present in the primary directory hides the same name in the
    /// fallback directory. Files without a timestamp sort last. Fails with
    /// `NoDataAvailable` when both directories are empty or missing.
    pub fn list_files(&self) -> StorageResult<Vec<DatasetFile>> {
        let primary = self.scan_dir(&self.primary_dir)?;
        debug!(
            dir = %self.primary_dir.display(),
            count = primary.len(),
            "Scanned primary dataset directory"
        );

        let primary_names: HashSet<String> = primary
            .iter()
            .filter_map(|p| file_name(p).map(str::to_string))
            .collect();

        let fallback: Vec<PathBuf> = self
            .scan_dir(&self.fallback_dir)?
            .into_iter()
            .filter(|p| file_name(p).map_or(true, |name| !primary_names.contains(name)))
            .collect();
        debug!(
            dir = %self.fallback_dir.display(),
            count = fallback.len(),
            "Scanned fallback dataset directory (excluding duplicates)"
        );

        let mut files: Vec<DatasetFile> = primary
            .into_iter()
            .chain(fallback)
            .map(DatasetFile::from_path)
            .collect();

        if files.is_empty() {
            return Err(StorageError::NoDataAvailable {
                primary: self.primary_dir.clone(),
                fallback: self.fallback_dir.clone(),
            });
        }

        // Stable: equal stamps keep primary-before-fallback order.
        files.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        for file in files.iter().filter(|f| f.timestamp.is_unknown()) {
            warn!(path = %file.path.display(), "Dataset filename carries no timestamp");
        }

        Ok(files)
    }

    /// Regular files directly inside `dir` with the dataset extension.
    /// A missing directory is empty, not an error.
    fn scan_dir(&self, dir: &Path) -> StorageResult<Vec<PathBuf>> {
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "Dataset directory does not exist");
            return Ok(Vec::new());
        }

        let suffix = format!(".{}", self.extension);
        let mut paths = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                // Depth 0 is the directory itself.
                Err(e) if e.depth() == 0 => {
                    return Err(StorageError::ListFailed {
                        path: dir.to_path_buf(),
                        message: e.to_string(),
                    });
                }
                // Entries renamed away mid-scan or dangling links.
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "Skipping unreadable directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            if !name.ends_with(&suffix) {
                continue;
            }

            paths.push(entry.into_path());
        }

        Ok(paths)
    }
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|s| s.to_str())
}
