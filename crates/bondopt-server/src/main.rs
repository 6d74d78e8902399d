//! Bondopt server entry point.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bondopt_ext_file::load_universe;
use bondopt_server::{Server, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,bondopt=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Bondopt Server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/bondopt.toml".to_string());

    let server_config = if std::path::Path::new(&config_path).exists() {
        info!("Loading configuration from {}", config_path);
        ServerConfig::from_file(&config_path)?
    } else {
        info!("Using default configuration");
        ServerConfig::default()
    };

    // Load the universe once; every request shares it read-only
    let universe = Arc::new(load_universe(&server_config.universe_file)?);

    let server = Server::new(server_config, universe);
    server.start().await?;

    Ok(())
}
