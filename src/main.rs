//! HTTP server for the legal computation engines.
//!
//! Environment:
//!
//! - `LEGAL_ENGINE_CONFIG`: configuration directory (default `./config/br_2024`)
//! - `PORT`: listen port (default `3000`)
//! - `RUST_LOG`: tracing filter (default `legal_engine=info`)

use std::net::SocketAddr;

use legal_engine::api::{AppState, create_router};
use legal_engine::config::ConfigLoader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config/br_2024";
const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("legal_engine=info")),
        )
        .init();

    let config_dir =
        std::env::var("LEGAL_ENGINE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = match ConfigLoader::load(&config_dir) {
        Ok(config) => config,
        Err(err) => {
            error!(config_dir = %config_dir, error = %err, "Failed to load configuration");
            return Err(err.into());
        }
    };
    info!(
        config_dir = %config_dir,
        tables = %config.tables().metadata.name,
        crimes = config.config().crimes().len(),
        "Configuration loaded"
    );

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let app = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Legal engine listening");

    axum::serve(listener, app).await?;
    Ok(())
}
