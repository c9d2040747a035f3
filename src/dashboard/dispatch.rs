//! Dispatcher
//!
//! Routes a selection to the matching chart builder. Unknown kinds fall
//! back to the county map rather than failing.

use super::kind::VisualizationKind;
use super::selection::{Selection, DEFAULT_VARIABLE};
use crate::charts::{
    bar_chart, county_map, scatter, scatter2, table, ChartError, ChartResult, Figure, MAP_COLORS,
};
use crate::data::{Column, DataContext};

/// Render from raw dropdown values
///
/// Only the variables the chosen builder uses are parsed; an empty second
/// value is the placeholder entry.
pub fn render(
    ctx: &DataContext,
    kind: &str,
    variable1: &str,
    variable2: &str,
) -> ChartResult<Figure> {
    let kind = match kind.parse::<VisualizationKind>() {
        Ok(kind) => kind,
        Err(e) => {
            tracing::debug!(error = %e, "Falling back to county map");
            let color = variable1
                .parse::<Column>()
                .ok()
                .filter(|c| MAP_COLORS.contains(c))
                .unwrap_or(DEFAULT_VARIABLE);
            return county_map(ctx, color);
        }
    };

    match kind {
        VisualizationKind::CountyMap => county_map(ctx, parse_column(variable1)?),
        VisualizationKind::BarChart => bar_chart(ctx, parse_column(variable1)?),
        VisualizationKind::Scatter => scatter(
            ctx,
            parse_column(variable1)?,
            parse_second(variable2, "championships scatter plot")?,
        ),
        VisualizationKind::Scatter2 => scatter2(
            ctx,
            parse_column(variable1)?,
            parse_second(variable2, "team age scatter plot")?,
        ),
        VisualizationKind::Table => Ok(table(ctx)),
    }
}

/// Render a typed selection
pub fn dispatch(ctx: &DataContext, selection: &Selection) -> ChartResult<Figure> {
    match selection.kind {
        VisualizationKind::CountyMap => county_map(ctx, selection.variable1),
        VisualizationKind::BarChart => bar_chart(ctx, selection.variable1),
        VisualizationKind::Scatter => {
            let color = selection.variable2.ok_or(ChartError::MissingColumn {
                chart: "championships scatter plot",
            })?;
            scatter(ctx, selection.variable1, color)
        }
        VisualizationKind::Scatter2 => {
            let size = selection.variable2.ok_or(ChartError::MissingColumn {
                chart: "team age scatter plot",
            })?;
            scatter2(ctx, selection.variable1, size)
        }
        VisualizationKind::Table => Ok(table(ctx)),
    }
}

fn parse_column(name: &str) -> ChartResult<Column> {
    name.parse()
        .map_err(|_| ChartError::UnknownColumn(name.to_string()))
}

fn parse_second(name: &str, chart: &'static str) -> ChartResult<Column> {
    if name.is_empty() {
        return Err(ChartError::MissingColumn { chart });
    }
    parse_column(name)
}
