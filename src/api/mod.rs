//! Courtside HTTP API
//!
//! HTTP layer for the dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - Dashboard page
//!
//! ## Dashboard
//! - `GET /api/v1/visualizations` - Visualization kinds and default selection
//! - `GET /api/v1/options?kind=` - Options for both variable dropdowns
//! - `POST /api/v1/selection` - Apply a dropdown change
//! - `GET /api/v1/figure` - Render one figure
//!
//! ## Data
//! - `GET /api/v1/data/teams` - Raw franchise rows
//! - `GET /api/v1/data/regions` - Rows aggregated by county
//! - `GET /api/v1/data/counties` - County boundaries
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use courtside::api::{serve, ApiConfig, AppState};
//! use courtside::data::{DataLoader, LoaderConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let data = DataLoader::new(LoaderConfig::default())?.load().await?;
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(Arc::new(data), config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Dashboard routes
        .route("/visualizations", get(routes::dashboard::list_visualizations))
        .route("/options", get(routes::dashboard::get_options))
        .route("/selection", post(routes::dashboard::apply_selection))
        .route("/figure", get(routes::dashboard::get_figure))
        // Data routes
        .route("/data/teams", get(routes::data::list_teams))
        .route("/data/regions", get(routes::data::list_regions))
        .route("/data/counties", get(routes::data::get_counties));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::page::index))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS for the configured origins; none configured means same origin only
/// and `"*"` allows any origin
fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.iter().any(|origin| origin.trim() == "*") {
        if origins.len() > 1 {
            tracing::warn!("CORS wildcard configured, ignoring the other listed origins");
        }
        return cors.allow_origin(AllowOrigin::any());
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Courtside dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Courtside shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::sample_context;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let state = AppState::new(sample_context(), ApiConfig::default());
        build_router(state)
    }

    fn app_with_origins(origins: &[&str]) -> Router {
        let config = ApiConfig {
            cors_origins: origins.iter().map(|o| o.to_string()).collect(),
            ..Default::default()
        };
        build_router(AppState::new(sample_context(), config))
    }

    async fn get_with_origin(app: Router, origin: &str) -> Response {
        app.oneshot(
            Request::builder()
                .uri("/health/live")
                .header("Origin", origin)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn send_get(uri: &str) -> Response {
        create_test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_json(uri: &str, body: &str) -> Response {
        create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let response = send_get("/health/live").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let response = send_get("/health/ready").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let response = send_get("/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["teams"], 4);
        assert_eq!(body["regions"], 3);
        assert_eq!(body["counties"], 3);
    }

    #[tokio::test]
    async fn test_index_page() {
        let response = send_get("/").await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("NBA Dashboard"));
        assert!(html.contains("visualization-dropdown"));
        assert!(html.contains("American Basketball Association (ABA)"));
        assert!(html.contains("Love and Basketball"));
    }

    #[tokio::test]
    async fn test_list_visualizations() {
        let body = json_body(send_get("/api/v1/visualizations").await).await;

        assert_eq!(body["kinds"].as_array().unwrap().len(), 5);
        assert_eq!(body["kinds"][2]["label"], "Scatter Plot 1");
        assert_eq!(body["default"]["kind"], "countymap");
        assert_eq!(body["default"]["variable1"], "Points");
        assert!(body["default"]["variable2"].is_null());
    }

    #[tokio::test]
    async fn test_options() {
        let body = json_body(send_get("/api/v1/options?kind=scatter2").await).await;

        assert_eq!(body["kind"], "scatter2");
        assert_eq!(body["variable1"][0]["value"], "Points");
        assert_eq!(body["variable2"].as_array().unwrap().len(), 6);

        let body = json_body(send_get("/api/v1/options?kind=nope").await).await;
        assert!(body["variable1"].as_array().unwrap().is_empty());
        assert_eq!(body["variable2"][0]["value"], "");
    }

    #[tokio::test]
    async fn test_apply_selection() {
        let response = post_json(
            "/api/v1/selection",
            r#"{"kind": "scatter", "variable1": "MVPs", "variable2": "State"}"#,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["selection"]["variable2"], "State");
        assert_eq!(body["figure"]["layout"]["width"], 600);
        assert_eq!(body["variable1_options"].as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_apply_selection_resets_variables() {
        let body = json_body(
            post_json(
                "/api/v1/selection",
                r#"{"kind": "countymap", "variable1": "Founded", "variable2": "Team"}"#,
            )
            .await,
        )
        .await;

        assert_eq!(body["selection"]["variable1"], "Points");
        assert!(body["selection"]["variable2"].is_null());
        assert_eq!(body["figure"]["data"][0]["type"], "choropleth");
    }

    #[tokio::test]
    async fn test_apply_selection_invalid_json() {
        let response = post_json("/api/v1/selection", "not json").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_figure() {
        let response = send_get("/api/v1/figure?kind=barchart&variable1=MVPs").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["data"][0]["type"], "bar");
    }

    #[tokio::test]
    async fn test_figure_unsupported_column() {
        let response = send_get("/api/v1/figure?kind=countymap&variable1=Team").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "CHART_ERROR");
    }

    #[tokio::test]
    async fn test_data_endpoints() {
        let teams = json_body(send_get("/api/v1/data/teams").await).await;
        assert_eq!(teams["total"], 4);
        assert_eq!(teams["rows"][0]["Team"], "Los Angeles Lakers");

        let regions = json_body(send_get("/api/v1/data/regions").await).await;
        assert_eq!(regions["total"], 3);
        assert_eq!(regions["rows"][0]["Points"], 760000);

        let counties = json_body(send_get("/api/v1/data/counties").await).await;
        assert_eq!(counties["type"], "FeatureCollection");
    }

    #[tokio::test]
    async fn test_cors_wildcard_allows_any_origin() {
        let app = app_with_origins(&["*"]);

        let response = get_with_origin(app, "http://example.com").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
    }

    #[tokio::test]
    async fn test_cors_listed_origin() {
        let app = app_with_origins(&["http://localhost:3000"]);
        let response = get_with_origin(app, "http://localhost:3000").await;
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://localhost:3000"
        );

        let app = app_with_origins(&["http://localhost:3000"]);
        let response = get_with_origin(app, "http://example.com").await;
        assert!(response
            .headers()
            .get("access-control-allow-origin")
            .is_none());
    }
}
