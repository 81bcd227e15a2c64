//! Taskboard data service -- REST persistence for the board client.
//!
//! An axum HTTP server over an in-memory table store seeded with the fixed
//! column set. List and single-row create/update/delete only; board logic
//! lives in the client.
//!
//! # Usage
//!
//! ```bash
//! # Run on default address 0.0.0.0:5000
//! cargo run --bin taskboard-server
//!
//! # Run on custom address
//! cargo run --bin taskboard-server -- --bind 127.0.0.1:8080
//!
//! # Or via environment variable
//! TASKBOARD_SERVER_ADDR=127.0.0.1:8080 cargo run --bin taskboard-server
//! ```

use std::sync::Arc;

use clap::Parser;
use taskboard_server::config::{ServerCliArgs, ServerConfig};
use taskboard_server::server;
use taskboard_server::store::TableStore;

#[tokio::main]
async fn main() {
    let cli = ServerCliArgs::parse();

    // Load config from CLI args + config file + env vars + defaults.
    let config = match ServerConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing with the resolved log level.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(addr = %config.bind_addr, "starting taskboard data service");

    let store = Arc::new(TableStore::new());

    match server::start_server_with_store(&config.bind_addr, store).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "data service listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "data service task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start data service");
            std::process::exit(1);
        }
    }
}
