#![forbid(unsafe_code)]

//! `sheet-relay-bot` binary.
//!
//! Bootstraps configuration, starts the health listener, and runs the
//! Discord gateway client until a shutdown signal arrives.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use sheet_relay_bot::config::{self, BotConfig};
use sheet_relay_bot::discord::client;
use sheet_relay_bot::state::AppState;
use sheet_relay_bot::{AppError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "sheet-relay-bot", about = "Discord to spreadsheet relay bot", version, long_about = None)]
struct Cli {
    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Path to a `.env` file loaded before reading the environment.
    #[arg(long)]
    env_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format)?;
    info!("sheet-relay-bot bootstrap");

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?
        .block_on(run(args))
        .inspect_err(|err| error!(%err, "fatal error; exiting"))
}

async fn run(args: Cli) -> Result<()> {
    // ── Load configuration ──────────────────────────────
    config::load_dotenv(args.env_file.as_deref())?;
    let config = Arc::new(BotConfig::from_env()?);

    // ── Build shared application state ──────────────────
    let ct = CancellationToken::new();
    let state = Arc::new(AppState::new(Arc::clone(&config), ct.clone())?);
    info!(
        channels = state.registry.len(),
        webhook_configured = state.submitter.is_configured(),
        "application state ready"
    );

    // ── Start health listener ───────────────────────────
    // Served before the gateway connects so the host sees the process as
    // alive while the bot is still logging in.
    // A failed bind is logged only; the bot keeps running without it.
    match state.health.ensure_started(ct.clone()).await {
        Ok(Some(addr)) => info!(%addr, "health server started"),
        Ok(None) => {}
        Err(err) => error!(%err, "health server failed to start"),
    }

    // ── Run gateway ─────────────────────────────────────
    let gateway = client::build_client(Arc::clone(&state)).await?;
    info!("starting gateway client");
    let result = client::run_until(gateway, shutdown_signal()).await;

    ct.cancel();
    info!("sheet-relay-bot shut down");
    result
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(err) => {
                tracing::warn!(%err, "failed to register SIGTERM handler, using ctrl-c only");
                let _ = ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(err) = ctrl_c.await {
            tracing::error!(%err, "ctrl-c signal handler failed");
        }
    }
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(env_filter);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
