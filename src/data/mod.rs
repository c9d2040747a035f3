//! Courtside Data Layer
//!
//! This module owns the dataset behind the dashboard:
//!
//! - **types**: Table columns and row types (TeamRecord, RegionRecord)
//! - **loader**: Fetching the CSV table and the county GeoJSON
//! - **aggregate**: Group-by-county sum of the count columns
//! - **context**: The immutable bundle handed to the chart builders
//! - **error**: Error types
//!
//! # Lifecycle
//!
//! ```text
//! Startup:
//!   CSV URL ──┐
//!             ├─→ parse → aggregate → DataContext (Arc, read-only)
//!   GeoJSON ──┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use courtside::data::{DataLoader, LoaderConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let loader = DataLoader::new(LoaderConfig::default())?;
//!     let ctx = loader.load().await?;
//!
//!     println!("Loaded {}", ctx.stats());
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod context;
pub mod error;
pub mod loader;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use aggregate::{aggregate_by_region, TEAM_SEPARATOR};
pub use context::{DataContext, DataStats};
pub use error::{DataError, DataResult};
pub use loader::{
    feature_ids, parse_counties, parse_teams, DataLoader, DataSource, LoaderConfig,
    DEFAULT_COUNTIES_URL, DEFAULT_TEAMS_URL,
};
pub use types::{CellValue, Column, RegionRecord, TeamRecord, UnknownColumn};
