//! Route definitions.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::sync::Semaphore;

use bondopt_core::Universe;
use bondopt_math::{LpSolver, MicroLpSolver};

use crate::config::ServerConfig;
use crate::handlers::{self, AppState};

/// Create the API router.
///
/// # Arguments
/// * `universe` - The bond universe, shared read-only by all requests
/// * `config` - Server configuration
pub fn create_router(universe: Arc<Universe>, config: ServerConfig) -> Router {
    create_router_with_solver(universe, config, Arc::new(MicroLpSolver))
}

/// Create the API router with a specific LP backend.
///
/// # Arguments
/// * `universe` - The bond universe, shared read-only by all requests
/// * `config` - Server configuration
/// * `solver` - Backend used for every optimization
pub fn create_router_with_solver(
    universe: Arc<Universe>,
    config: ServerConfig,
    solver: Arc<dyn LpSolver + Send + Sync>,
) -> Router {
    let state = Arc::new(AppState {
        universe,
        solve_permits: Arc::new(Semaphore::new(config.solve_permits())),
        config,
        solver,
    });

    Router::new()
        // Health
        .route("/health", get(handlers::health))
        .route("/api/v1/health", get(handlers::health))
        // Screening
        .route("/api/v1/categories", get(handlers::categories))
        .route("/api/v1/summary", post(handlers::summary))
        // Optimization
        .route("/api/v1/optimize", post(handlers::optimize))
        .with_state(state)
}
