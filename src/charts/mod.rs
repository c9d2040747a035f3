//! Courtside Charts
//!
//! Pure chart builders producing Plotly figure descriptions:
//!
//! - **builders**: County map, bar chart, two scatter plots, raw table
//! - **figure**: Typed subset of the Plotly figure schema
//! - **trendline**: Least squares fit drawn on the scatter plots
//! - **error**: Error types
//!
//! Rendering happens in the browser; nothing here draws pixels.

pub mod builders;
pub mod error;
pub mod figure;
pub mod trendline;

pub use builders::{
    bar_chart, county_map, scatter, scatter2, table, BAR_COLORS, MAP_COLORS, SCATTER2_SIZES,
    SCATTER_COLORS, SCATTER_Y,
};
pub use error::{ChartError, ChartResult};
pub use figure::{Figure, Layout, Trace};
pub use trendline::{ols, LinearFit};
