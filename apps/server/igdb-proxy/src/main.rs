use igdb_proxy::error::ProxyError;
use igdb_proxy::logger::initialize as LoggerInitialize;
use igdb_proxy::server;
use igdb_proxy::state::AppState;

use catalog_core::config::{ProxyConfig, log_dir_from_env};

use std::fs::create_dir_all;
use std::process::ExitCode;
use std::sync::Arc;

use log::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("igdb-proxy failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ProxyError> {
    let log_dir = log_dir_from_env();

    create_dir_all(&log_dir)
        .map_err(|e| ProxyError::startup(format!("Failed to create log directory {}: {e}", log_dir.display())))?;

    // Initialize logger FIRST
    LoggerInitialize(&log_dir)?;

    info!("IGDB proxy starting");

    let config = ProxyConfig::from_env()?;
    let state = Arc::new(AppState::from_config(&config)?);

    server::run(&config.listen_address(), state).await
}
