//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (data loaded)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe. The server only starts after the data has
/// loaded, so this checks that the tables are still non-empty.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if check_data_health(&state) {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
///
/// Full health status with dataset details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let stats = state.data.stats();

    // Missing boundaries only break the map
    let status = if !check_data_health(&state) {
        "unhealthy"
    } else if stats.counties == 0 {
        "degraded"
    } else {
        "healthy"
    };

    Json(HealthResponse {
        status: status.to_string(),
        teams: stats.teams,
        regions: stats.regions,
        counties: stats.counties,
        loaded_at: state.data.loaded_at(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn check_data_health(state: &AppState) -> bool {
    let stats = state.data.stats();
    stats.teams > 0 && stats.regions > 0
}
