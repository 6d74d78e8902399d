//! # Bondopt Server
//!
//! REST server for bond universe screening and portfolio optimization.
//!
//! ## Features
//!
//! - Category listing for building segment selections
//! - Segment summaries (market value, OAS and YTM statistics)
//! - LP portfolio optimization on a bounded blocking pool with a timeout
//! - Configuration via TOML file
//!
//! ## Usage
//!
//! ```ignore
//! use bondopt_server::{Server, ServerConfig};
//!
//! let config = ServerConfig::from_file("config/bondopt.toml")?;
//! let universe = bondopt_ext_file::load_universe(&config.universe_file)?;
//! Server::new(config, Arc::new(universe)).start().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use bondopt_core::Universe;

pub use config::ServerConfig;
pub use error::ServerError;

/// The bondopt server.
pub struct Server {
    config: ServerConfig,
    universe: Arc<Universe>,
}

impl Server {
    /// Create a new server.
    pub fn new(config: ServerConfig, universe: Arc<Universe>) -> Self {
        Self { config, universe }
    }

    /// Build the router.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes::create_router(self.universe.clone(), self.config.clone())
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Start the server.
    pub async fn start(&self) -> Result<(), ServerError> {
        let addr = SocketAddr::new(
            self.config.host.parse().unwrap_or([0, 0, 0, 0].into()),
            self.config.port,
        );

        info!(
            bonds = self.universe.len(),
            "Starting bondopt server on {}", addr
        );

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}
