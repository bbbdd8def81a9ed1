//! Service configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default product variable in TEMPO NO2 Level 3 files.
pub const DEFAULT_VARIABLE: &str = "vertical_column_total";

/// Default dataset file extension.
pub const DEFAULT_FILE_EXTENSION: &str = "nc";

/// Default downscale stride for full-grid previews.
pub const DEFAULT_STRIDE: usize = 10;

/// Default producer interval (every 10 minutes).
pub const DEFAULT_PRODUCER_INTERVAL: Duration = Duration::from_secs(600);

/// Settings for retrieval and the optional producer.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory populated by the producer; wins on duplicate filenames.
    pub primary_dir: PathBuf,
    /// Data bundled with the deployment.
    pub fallback_dir: PathBuf,
    /// Product variable to render.
    pub variable: String,
    /// Dataset file extension, without the dot.
    pub file_extension: String,
    /// Stride used by the full-grid endpoints when none is given.
    pub default_stride: usize,
    /// External process that downloads new datasets, if any.
    pub producer: Option<ProducerConfig>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            primary_dir: PathBuf::from("./tempo_data"),
            fallback_dir: PathBuf::from("./resources/tempoData/NO2_L3"),
            variable: DEFAULT_VARIABLE.to_string(),
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            default_stride: DEFAULT_STRIDE,
            producer: None,
        }
    }
}

/// A periodically executed external command.
#[derive(Debug, Clone)]
pub struct ProducerConfig {
    /// Program followed by its arguments.
    pub command: Vec<String>,
    /// Working directory for the process.
    pub working_dir: PathBuf,
    /// Time between runs.
    pub interval: Duration,
}

impl ProducerConfig {
    /// Split a command line on whitespace. Returns `None` for a blank line.
    ///
    /// The process runs in the parent of `primary_dir`, where the producer
    /// keeps its scripts and writes the primary directory.
    pub fn from_command_line(command: &str, primary_dir: &Path, interval: Duration) -> Option<Self> {
        let command: Vec<String> = command.split_whitespace().map(str::to_string).collect();
        if command.is_empty() {
            return None;
        }
        let working_dir = primary_dir
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Some(Self {
            command,
            working_dir,
            interval,
        })
    }

    pub fn program(&self) -> &str {
        self.command.first().map(String::as_str).unwrap_or_default()
    }

    pub fn args(&self) -> &[String] {
        self.command.get(1..).unwrap_or_default()
    }
}
