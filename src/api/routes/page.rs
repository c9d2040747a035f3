//! Dashboard Page
//!
//! - GET / - The single HTML page with the three dropdowns and the chart

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../../assets/index.html");

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
