//! # Courtside
//!
//! Interactive NBA franchise dashboard: a county choropleth, a bar chart,
//! two scatter plots and a raw table over one franchise dataset, driven by
//! three dependent dropdowns.
//!
//! ## Modules
//!
//! - [`data`]: Loading the franchise CSV and county GeoJSON, county aggregation
//! - [`charts`]: Chart builders producing Plotly figure JSON
//! - [`dashboard`]: Option resolver, selection state and dispatcher
//! - [`api`]: HTTP server with Axum
//! - [`config`]: Config file and environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use courtside::data::{DataLoader, LoaderConfig};
//! use courtside::dashboard::update;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Fetch both resources and aggregate by county
//!     let ctx = DataLoader::new(LoaderConfig::default())?.load().await?;
//!
//!     // Same step the page runs on a dropdown change
//!     let view = update(&ctx, "scatter", "MVPs", "State")?;
//!
//!     println!("{}", serde_json::to_string(&view.figure)?);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod data;

// Re-export top-level types for convenience
pub use data::{
    Column, DataContext, DataError, DataLoader, DataResult, LoaderConfig, RegionRecord,
    TeamRecord,
};

pub use charts::{ChartError, ChartResult, Figure};

pub use dashboard::{dispatch, render, update, DashboardView, Selection, VisualizationKind};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::Config;
