//! Data Routes
//!
//! Read-only views of the loaded tables.
//!
//! - GET /api/v1/data/teams - Raw franchise rows
//! - GET /api/v1/data/regions - Rows aggregated by county
//! - GET /api/v1/data/counties - County boundary GeoJSON

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::dto::TableResponse;
use crate::api::state::AppState;

/// GET /api/v1/data/teams
pub async fn list_teams(State(state): State<Arc<AppState>>) -> Response {
    let rows = state.data.teams();
    Json(TableResponse {
        total: rows.len(),
        rows,
    })
    .into_response()
}

/// GET /api/v1/data/regions
pub async fn list_regions(State(state): State<Arc<AppState>>) -> Response {
    let rows = state.data.regions();
    Json(TableResponse {
        total: rows.len(),
        rows,
    })
    .into_response()
}

/// GET /api/v1/data/counties
pub async fn get_counties(State(state): State<Arc<AppState>>) -> Response {
    Json(Arc::clone(state.data.counties())).into_response()
}
