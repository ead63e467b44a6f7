use std::future::IntoFuture;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use clap::Parser;
use petfinder_gateway::config::ServerConfig;
use petfinder_gateway::{
    AppState, CliOverrides, GatewayConfig, LogFormat, build_router, logging, shutdown,
};
use tokio::net::TcpListener;
use tokio::sync::Notify;

/// Petfinder Gateway - nearby-pet search and pet lookup over the Petfinder API
#[derive(Parser)]
#[command(name = "petfinder-gateway")]
#[command(version)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for the HTTP listener (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Dotenv-style file loaded before anything else; ignored when absent
    #[arg(long, default_value = "config.env")]
    env_file: PathBuf,

    /// Log output format
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,

    /// Log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // credentials and PF_GATEWAY__* may come from the env file
    let env_file = dotenvy::from_path(&cli.env_file);

    let mut config = GatewayConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(CliOverrides {
        port: cli.port,
        verbose: cli.verbose,
        log_format: cli.log_format,
    });
    logging::init_logging(&config.logging)?;
    report_env_file(&cli.env_file, &env_file);

    let client = petfinder_sdk::get_client()
        .await
        .context("Failed to initialize Petfinder client")?;
    tracing::info!(base_url = client.base_url(), "upstream configured");

    serve(build_router(AppState::new(client)), &config.server).await
}

fn report_env_file(path: &Path, outcome: &dotenvy::Result<()>) {
    match outcome {
        Ok(()) => tracing::info!(path = %path.display(), "loaded environment file"),
        Err(e) if e.not_found() => {
            tracing::debug!(path = %path.display(), "no environment file, using process environment");
        }
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to load environment file"),
    }
}

async fn serve(router: Router, server: &ServerConfig) -> Result<()> {
    let addr = server.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "petfinder gateway listening");

    let stopping = Arc::new(Notify::new());
    let notifier = Arc::clone(&stopping);
    let serving = axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown::stop_signal().await;
            notifier.notify_one();
        })
        .into_future();

    let grace = server.shutdown_timeout;
    tokio::select! {
        result = serving => result.context("HTTP server failed")?,
        () = async {
            stopping.notified().await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(
                grace_secs = grace.as_secs(),
                "in-flight requests still running after grace period, exiting"
            );
        }
    }

    tracing::info!("petfinder gateway stopped");
    Ok(())
}
