//! Level 3 API Server
//!
//! Serves TEMPO NO2 Level 3 regions and previews, and optionally runs the
//! producer that keeps the primary dataset directory fresh.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::broadcast;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use level_three_api::config::{
    ProducerConfig, ServiceConfig, DEFAULT_FILE_EXTENSION, DEFAULT_VARIABLE,
};
use level_three_api::scheduler::ProducerScheduler;
use level_three_api::state::AppState;

/// Level 3 API Server
#[derive(Parser, Debug)]
#[command(name = "level-three-api")]
#[command(about = "TEMPO NO2 Level 3 region and preview rendering server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8080", env = "L3_LISTEN_ADDR")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Directory written by the producer
    #[arg(long, default_value = "./tempo_data", env = "L3_PRIMARY_DIR")]
    primary_dir: PathBuf,

    /// Directory of bundled datasets
    #[arg(
        long,
        default_value = "./resources/tempoData/NO2_L3",
        env = "L3_FALLBACK_DIR"
    )]
    fallback_dir: PathBuf,

    /// Product variable to render
    #[arg(long, default_value = DEFAULT_VARIABLE, env = "L3_VARIABLE")]
    variable: String,

    /// Dataset file extension
    #[arg(long, default_value = DEFAULT_FILE_EXTENSION, env = "L3_FILE_EXTENSION")]
    file_extension: String,

    /// Stride for full-grid requests without scaleFactor
    #[arg(long, default_value_t = 10, env = "L3_DEFAULT_STRIDE")]
    default_stride: usize,

    /// Producer command line, run periodically when set
    #[arg(long, env = "L3_PRODUCER_COMMAND")]
    producer_command: Option<String>,

    /// Seconds between producer runs
    #[arg(long, default_value_t = 600, env = "L3_PRODUCER_INTERVAL_SECS")]
    producer_interval_secs: u64,

    /// Number of worker threads
    #[arg(long, env = "L3_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

impl Args {
    fn service_config(&self) -> Result<ServiceConfig> {
        anyhow::ensure!(self.default_stride >= 1, "--default-stride must be at least 1");

        let producer = self.producer_command.as_deref().and_then(|cmd| {
            ProducerConfig::from_command_line(
                cmd,
                &self.primary_dir,
                Duration::from_secs(self.producer_interval_secs),
            )
        });

        Ok(ServiceConfig {
            primary_dir: self.primary_dir.clone(),
            fallback_dir: self.fallback_dir.clone(),
            variable: self.variable.clone(),
            file_extension: self.file_extension.clone(),
            default_stride: self.default_stride,
            producer,
        })
    }
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(run_server(args))
}

async fn run_server(args: Args) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    info!("Starting Level 3 API server");

    netcdf_parser::silence_hdf5_errors();

    let config = args.service_config()?;
    info!(
        primary_dir = %config.primary_dir.display(),
        fallback_dir = %config.fallback_dir.display(),
        variable = %config.variable,
        default_stride = config.default_stride,
        "Dataset configuration"
    );

    let state = Arc::new(AppState::new(&config));

    // Shutdown signal
    let (shutdown_tx, _) = broadcast::channel::<()>(1);

    let shutdown_tx_clone = shutdown_tx.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received shutdown signal");
        shutdown_tx_clone.send(()).ok();
    });

    if let Some(producer) = config.producer.clone() {
        let scheduler = ProducerScheduler::new(producer);
        let shutdown = shutdown_tx.subscribe();
        tokio::spawn(async move { scheduler.run_forever(shutdown).await });
    } else {
        info!("No producer command configured, serving existing datasets only");
    }

    let app = level_three_api::build_router(state);

    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", args.listen))?;

    info!("Level 3 API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    let mut shutdown = shutdown_tx.subscribe();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.recv().await.ok();
        })
        .await
        .map_err(|e| {
            error!(error = %e, "Server failed");
            e
        })?;

    info!("Level 3 API stopped");
    Ok(())
}
