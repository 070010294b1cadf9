//! HTTP server for the settlement engine.
//!
//! Environment:
//! - `SETTLEMENT_CONFIG_DIR`: legislation config directory (default `./config/clt`)
//! - `SETTLEMENT_BIND_ADDR`: listen address (default `0.0.0.0:3000`)
//! - `RUST_LOG`: tracing filter (default `info`)

use std::env;

use settlement_engine::api::{AppState, create_router};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_CONFIG_DIR: &str = "./config/clt";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();
}

async fn wait_for_shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config_dir =
        env::var("SETTLEMENT_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind_addr =
        env::var("SETTLEMENT_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let state = AppState::from_config_dir(&config_dir)?;
    info!(
        config_dir = %config_dir,
        legislation = %state.config().metadata().name,
        version = %state.config().metadata().version,
        "Loaded legislation configuration"
    );

    let app = create_router(state);
    let listener = TcpListener::bind(bind_addr.as_str()).await?;
    info!(bind_addr = %bind_addr, "Settlement engine listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;

    info!("Settlement engine stopped");
    Ok(())
}
