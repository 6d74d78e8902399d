//! Request handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use tokio::sync::Semaphore;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, error, warn};

use bondopt_core::{ClassLevel, Date, TargetMetric, Universe};
use bondopt_math::LpSolver;
use bondopt_portfolio::{
    list_categories, summarize_segment, OptimizationParams, OptimizationRequest,
    OptimizationResult, PortfolioError, PortfolioProblem, PortfolioResult, SegmentSummary,
    SolveStatus, SummaryRequest,
};

use crate::config::ServerConfig;

/// Application state.
pub struct AppState {
    /// The bond universe, read-only for the life of the process
    pub universe: Arc<Universe>,
    /// Server configuration
    pub config: ServerConfig,
    /// LP backend used for every solve
    pub solver: Arc<dyn LpSolver + Send + Sync>,
    /// Limits the number of solves running at once
    pub solve_permits: Arc<Semaphore>,
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

fn rejection_response(rejection: &JsonRejection) -> Response {
    error_response(
        StatusCode::BAD_REQUEST,
        format!("Invalid request body: {}", rejection.body_text()),
    )
}

fn portfolio_error_response(err: &PortfolioError) -> Response {
    let status = if err.is_validation() {
        StatusCode::BAD_REQUEST
    } else if err.is_configuration() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    if status.is_server_error() {
        error!("request failed: {}", err);
    }
    error_response(status, err.to_string())
}

// =============================================================================
// CATEGORIES
// =============================================================================

/// List the distinct classification tags and ratings available for
/// segment selection.
pub async fn categories(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let listing = list_categories(&state.universe);

    let mut body = serde_json::Map::new();
    for level in ClassLevel::ALL {
        body.insert(level.column_name().to_string(), json!(listing.level(level)));
    }
    body.insert("RATING".to_string(), json!(listing.ratings));
    Json(serde_json::Value::Object(body))
}

// =============================================================================
// SUMMARY
// =============================================================================

/// Summary response; undefined statistics are `null`.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// Selection the summary was computed for
    pub request: SummaryRequest,
    /// Market value and metric statistics
    #[serde(flatten)]
    pub summary: SegmentSummary,
}

/// Filter the universe to one segment and summarise it.
pub async fn summary(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SummaryRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return rejection_response(&rejection),
    };

    let selector = match request.validate() {
        Ok(selector) => selector,
        Err(e) => return portfolio_error_response(&e),
    };

    match summarize_segment(&state.universe, &selector) {
        Ok(summary) => {
            debug!(count = summary.count, "segment summarised");
            (StatusCode::OK, Json(SummaryResponse { request, summary })).into_response()
        }
        Err(e) => portfolio_error_response(&e),
    }
}

// =============================================================================
// OPTIMIZE
// =============================================================================

/// Optimization response.
#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    /// `optimal` or `infeasible`
    pub status: SolveStatus,
    /// Metric that was maximised
    pub target: TargetMetric,
    /// Effective date of the candidate bonds
    pub effective_date: Date,
    /// Number of candidate bonds
    pub candidates: usize,
    /// Objective value at the optimum
    pub objective_value: Option<f64>,
    /// Unweighted sum of candidate durations
    pub duration_target: f64,
    /// Allowed portfolio duration range
    pub duration_band: (f64, f64),
    /// Weighted portfolio duration
    pub portfolio_duration: Option<f64>,
    /// Sum of held weights
    pub total_weight: Option<f64>,
    /// Held weight per category
    pub exposures: std::collections::BTreeMap<String, f64>,
    /// Held weight per security alias
    pub weights: std::collections::BTreeMap<String, f64>,
}

impl From<&OptimizationResult> for OptimizeResponse {
    fn from(result: &OptimizationResult) -> Self {
        let optimal = result.is_optimal();
        Self {
            status: result.status,
            target: result.target,
            effective_date: result.effective_date,
            candidates: result.candidates.len(),
            objective_value: result.objective_value,
            duration_target: result.duration_target,
            duration_band: result.duration_band(),
            portfolio_duration: optimal.then(|| result.portfolio_duration()),
            total_weight: optimal.then(|| result.total_weight()),
            exposures: result.category_exposures(),
            weights: result.allocation_map(),
        }
    }
}

/// Build and solve a portfolio model.
///
/// The solve runs on the blocking pool under a concurrency permit. The
/// configured timeout starts when the request arrives and also bounds the
/// wait for a permit. An infeasible model is a 200 with `"status": "infeasible"`; a
/// timeout is a 504 with `"status": "timed_out"`.
pub async fn optimize(
    State(state): State<Arc<AppState>>,
    body: Result<Json<OptimizationRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return rejection_response(&rejection),
    };

    let params = match request.resolve(&state.config.optimizer_defaults) {
        Ok(params) => params,
        Err(e) => return portfolio_error_response(&e),
    };

    // One deadline covers both the wait for a solve slot and the solve.
    let deadline = Instant::now() + state.config.solve_timeout();
    let permit = match timeout_at(deadline, state.solve_permits.clone().acquire_owned()).await {
        Ok(Ok(permit)) => permit,
        Ok(Err(_)) => {
            return error_response(StatusCode::SERVICE_UNAVAILABLE, "Solver pool is shut down")
        }
        Err(_) => {
            warn!(
                timeout_ms = state.config.solve_timeout_ms,
                "no solve slot freed up before the deadline"
            );
            return timed_out_response(&state);
        }
    };

    let task_state = state.clone();
    let handle = tokio::task::spawn_blocking(move || {
        // Held until the solve ends, including after a timeout.
        let _permit = permit;
        run_optimization(&task_state, &params)
    });

    match timeout_at(deadline, handle).await {
        Ok(Ok(Ok(result))) => {
            (StatusCode::OK, Json(OptimizeResponse::from(&result))).into_response()
        }
        Ok(Ok(Err(e))) => portfolio_error_response(&e),
        Ok(Err(join_error)) => {
            error!("solve task failed: {}", join_error);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Solve task failed")
        }
        Err(_) => {
            warn!(timeout_ms = state.config.solve_timeout_ms, "solve timed out");
            timed_out_response(&state)
        }
    }
}

fn timed_out_response(state: &AppState) -> Response {
    (
        StatusCode::GATEWAY_TIMEOUT,
        Json(json!({
            "status": "timed_out",
            "error": format!("Solve exceeded {} ms", state.config.solve_timeout_ms),
        })),
    )
        .into_response()
}

fn run_optimization(
    state: &AppState,
    params: &OptimizationParams,
) -> PortfolioResult<OptimizationResult> {
    let problem = PortfolioProblem::build(&state.universe, params, &state.config.optimizer)?;

    if let Some(dir) = &state.config.lp_dump_dir {
        let path = lp_dump_path(Path::new(dir), params);
        if let Err(e) = std::fs::write(&path, problem.lp_model().to_lp_format()) {
            warn!(path = %path.display(), "failed to write LP dump: {}", e);
        } else {
            debug!(path = %path.display(), "wrote LP dump");
        }
    }

    problem.solve_with(state.solver.as_ref())
}

/// Dump file for a parameter set. Requests differing in any parameter get
/// distinct files; identical requests build identical models.
fn lp_dump_path(dir: &Path, params: &OptimizationParams) -> PathBuf {
    dir.join(format!(
        "bond_portfolio_{}_{}_cap{}_max{}_delta{}.lp",
        params.target,
        params.effective_date,
        params.sector_cap,
        params.max_individual_weight,
        params.duration_delta
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lp_dump_path() {
        let params = OptimizationParams::new(TargetMetric::Ytm, Date::from_ymd(2023, 3, 31).unwrap());
        assert_eq!(
            lp_dump_path(Path::new("/tmp/lp"), &params),
            PathBuf::from("/tmp/lp/bond_portfolio_YTM_2023-03-31_cap0.05_max0.02_delta3.lp")
        );

        let wider = params.clone().with_duration_delta(8.0);
        assert_ne!(
            lp_dump_path(Path::new("/tmp/lp"), &params),
            lp_dump_path(Path::new("/tmp/lp"), &wider)
        );
    }
}
