// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use secret_bridge::clients::{StoreClient, VaultClient};
use secret_bridge::config::{parse_duration, Config};
use secret_bridge::sync::{Reconciler, SyncRunner};

#[derive(Parser)]
#[command(name = "secret-bridge")]
#[command(about = "Mirror vault item fields into store secret variables")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Keep running and sync on every interval
    #[arg(long)]
    daemon: bool,

    /// Sync interval for daemon mode (e.g. 30s, 5m, 1h). Overrides SYNC_INTERVAL
    #[arg(long)]
    interval: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.log.init();

    info!("Configuration loaded:");
    info!("  Vault host: {}", config.vault_host);
    info!("  Vault: {}", config.vault_id);
    info!("  Store host: {}", config.store_host);
    info!("  Request timeout: {:?}", config.request_timeout);

    let vault = VaultClient::from_config(&config)?;
    let store = StoreClient::from_config(&config)?;
    let runner = SyncRunner::new(Reconciler::new(vault, store));

    if cli.daemon {
        let period = match &cli.interval {
            Some(raw) => parse_duration(raw).context("Invalid --interval")?,
            None => config.sync_interval()?,
        };
        runner.run_until(period, shutdown_signal()).await;
        return Ok(ExitCode::SUCCESS);
    }

    let report = runner.run_once().await;
    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Resolves on SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
