//! Courtside Dashboard Logic
//!
//! The dropdown state machine behind the page, as pure functions:
//!
//! - **kind**: Visualization kinds of the first dropdown
//! - **options**: Option Resolver, kind to legal variable columns
//! - **selection**: The three dropdown values, always kept legal
//! - **dispatch**: Dispatcher, selection to chart builder
//! - **view**: One update step (normalize, resolve, render)
//!
//! # Update Flow
//!
//! ```text
//! dropdown change → Selection::normalize → options → dispatch → Figure
//! ```

pub mod dispatch;
pub mod kind;
pub mod options;
pub mod selection;
pub mod view;

pub use dispatch::{dispatch, render};
pub use kind::{UnknownKind, VisualizationKind};
pub use options::{
    allowed_variables, allowed_variables2, primary_columns, primary_options, secondary_columns,
    secondary_options, VariableOption, PLACEHOLDER_LABEL,
};
pub use selection::{Selection, DEFAULT_VARIABLE};
pub use view::{render_view, update, DashboardView};
