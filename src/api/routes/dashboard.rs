//! Dashboard Routes
//!
//! - GET /api/v1/visualizations - Visualization kinds and the default selection
//! - GET /api/v1/options?kind= - Option lists for both variable dropdowns
//! - POST /api/v1/selection - Apply a dropdown change, get options and figure
//! - GET /api/v1/figure?kind=&variable1=&variable2= - Render one figure

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{
    KindOption, OptionsQuery, OptionsResponse, SelectionRequest, VisualizationsResponse,
};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::charts::Figure;
use crate::dashboard::{
    allowed_variables, allowed_variables2, render, update, DashboardView, Selection,
    VisualizationKind,
};

/// GET /api/v1/visualizations
pub async fn list_visualizations() -> Json<VisualizationsResponse> {
    Json(VisualizationsResponse {
        kinds: VisualizationKind::ALL.into_iter().map(KindOption::from).collect(),
        default: Selection::default(),
    })
}

/// GET /api/v1/options
///
/// Unknown kinds get an empty first list and the placeholder second list.
pub async fn get_options(Query(query): Query<OptionsQuery>) -> Json<OptionsResponse> {
    Json(OptionsResponse {
        variable1: allowed_variables(&query.kind),
        variable2: allowed_variables2(&query.kind),
        kind: query.kind,
    })
}

/// POST /api/v1/selection
///
/// One dashboard update: out-of-range values are reset rather than
/// rejected, so the page always gets a figure back.
pub async fn apply_selection(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectionRequest>,
) -> ApiResult<Json<DashboardView>> {
    let view = update(&state.data, &req.kind, &req.variable1, req.variable2())?;

    tracing::info!(
        kind = %view.selection.kind,
        variable1 = %view.selection.variable1,
        "Selection applied"
    );

    Ok(Json(view))
}

/// GET /api/v1/figure
///
/// Direct dispatcher access. Columns outside the chart's set are a 400.
pub async fn get_figure(
    State(state): State<Arc<AppState>>,
    Query(req): Query<SelectionRequest>,
) -> ApiResult<Json<Figure>> {
    let figure = render(&state.data, &req.kind, &req.variable1, req.variable2())?;
    Ok(Json(figure))
}
