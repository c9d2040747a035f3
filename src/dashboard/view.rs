//! Dashboard update step
//!
//! What the page runs on every dropdown change, as plain function calls:
//! normalize the selection, resolve both option lists, render the figure.

use serde::Serialize;

use super::dispatch::dispatch;
use super::kind::VisualizationKind;
use super::options::{primary_options, secondary_options, VariableOption};
use super::selection::Selection;
use crate::charts::{ChartResult, Figure};
use crate::data::{Column, DataContext};

/// Everything the page needs after a change
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub selection: Selection,
    pub variable1_options: Vec<VariableOption>,
    pub variable2_options: Vec<VariableOption>,
    pub figure: Figure,
}

/// Apply raw dropdown values and recompute the dependent outputs
///
/// Unknown kinds become the county map and unknown or out-of-range
/// variables are reset, so any input yields a legal view.
pub fn update(
    ctx: &DataContext,
    kind: &str,
    variable1: &str,
    variable2: &str,
) -> ChartResult<DashboardView> {
    let kind = kind.parse::<VisualizationKind>().unwrap_or_default();
    let selection = Selection::normalize(kind, variable1.parse().ok(), parse_optional(variable2));
    render_view(ctx, selection)
}

/// Build the view for an already legal selection
pub fn render_view(ctx: &DataContext, selection: Selection) -> ChartResult<DashboardView> {
    let figure = dispatch(ctx, &selection)?;

    tracing::debug!(
        kind = %selection.kind,
        variable1 = %selection.variable1,
        variable2 = ?selection.variable2.map(|c| c.header()),
        trace = figure.trace_kind(),
        "Rendered dashboard view"
    );

    Ok(DashboardView {
        selection,
        variable1_options: primary_options(selection.kind),
        variable2_options: secondary_options(selection.kind),
        figure,
    })
}

fn parse_optional(value: &str) -> Option<Column> {
    if value.is_empty() {
        None
    } else {
        value.parse().ok()
    }
}
