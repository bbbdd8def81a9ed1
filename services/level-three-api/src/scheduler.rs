//! Periodic producer process that refreshes the primary dataset directory.

use std::process::{ExitStatus, Stdio};

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use crate::config::ProducerConfig;

/// Runs the configured producer command on a fixed interval.
///
/// The producer publishes new files into the primary directory on its own;
/// the catalog picks them up on the next scan.
pub struct ProducerScheduler {
    config: ProducerConfig,
}

impl ProducerScheduler {
    pub fn new(config: ProducerConfig) -> Self {
        Self { config }
    }

    /// Run once immediately, then once per interval, until shutdown.
    pub async fn run_forever(&self, mut shutdown: broadcast::Receiver<()>) {
        info!(
            command = ?self.config.command,
            working_dir = %self.config.working_dir.display(),
            interval_secs = self.config.interval.as_secs(),
            "Starting producer scheduler"
        );

        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    info!("Shutting down producer scheduler");
                    break;
                }
                result = self.run_once() => {
                    if let Err(e) = result {
                        error!(error = %e, "Producer run failed");
                    }
                }
            }

            tokio::select! {
                _ = shutdown.recv() => {
                    info!("Shutting down producer scheduler");
                    break;
                }
                _ = tokio::time::sleep(self.config.interval) => {}
            }
        }
    }

    /// Run the producer to completion, streaming its output into the log.
    pub async fn run_once(&self) -> Result<ExitStatus> {
        info!(command = ?self.config.command, "Running producer");

        let mut child = Command::new(self.config.program())
            .args(self.config.args())
            .current_dir(&self.config.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to start producer '{}'", self.config.program()))?;

        let stdout = child.stdout.take().context("producer stdout not captured")?;
        let stderr = child.stderr.take().context("producer stderr not captured")?;

        let (status, _, _) = tokio::join!(
            child.wait(),
            forward_lines(stdout, Stream::Stdout),
            forward_lines(stderr, Stream::Stderr),
        );
        let status = status.context("failed to wait for producer")?;

        if status.success() {
            info!(%status, "Producer finished");
        } else {
            warn!(%status, "Producer exited unsuccessfully");
        }
        Ok(status)
    }
}

#[derive(Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

async fn forward_lines<R: AsyncRead + Unpin>(reader: R, stream: Stream) {
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match stream {
                Stream::Stdout => info!(target: "producer", "{}", line),
                Stream::Stderr => error!(target: "producer", "{}", line),
            },
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Failed to read producer output");
                break;
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::Path;
    use std::time::Duration;

    fn scheduler(command: &str, primary: &Path) -> ProducerScheduler {
        let config =
            ProducerConfig::from_command_line(command, primary, Duration::from_millis(10)).unwrap();
        ProducerScheduler::new(config)
    }

    #[tokio::test]
    async fn test_run_once_reports_exit_status() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("tempo_data");

        let ok = scheduler("true", &primary).run_once().await.unwrap();
        assert!(ok.success());

        let failed = scheduler("false", &primary).run_once().await.unwrap();
        assert!(!failed.success());
    }

    #[tokio::test]
    async fn test_runs_in_parent_of_primary_dir() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("tempo_data");

        let status = scheduler("touch produced.marker", &primary)
            .run_once()
            .await
            .unwrap();
        assert!(status.success());
        assert!(dir.path().join("produced.marker").is_file());
    }

    #[tokio::test]
    async fn test_missing_program_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = scheduler("definitely-not-a-real-producer-binary", &dir.path().join("d"))
            .run_once()
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_run_forever_stops_on_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let sched = scheduler("true", &dir.path().join("tempo_data"));
        let (tx, rx) = broadcast::channel::<()>(1);

        let handle = tokio::spawn(async move { sched.run_forever(rx).await });
        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(()).unwrap();

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("scheduler did not stop")
            .unwrap();
    }
}
