//! Chart Builders
//!
//! Five pure functions from the data context (plus 0 to 2 columns) to a
//! figure. Each builder fixes its own axes, hover fields and sizing; the
//! selected columns only change the color, y-axis or marker size, never the
//! rows shown. Every builder owns its allowed column set and rejects
//! anything outside it with [`ChartError::UnsupportedColumn`].

use std::collections::HashMap;
use std::sync::Arc;

use super::error::{ChartError, ChartResult};
use super::figure::*;
use super::trendline::ols;
use crate::data::{CellValue, Column, DataContext, RegionRecord, TeamRecord};

/// Color columns for the county map
pub const MAP_COLORS: &[Column] = &[
    Column::Points,
    Column::Mvps,
    Column::FinalsMvps,
    Column::AllNbaFirstTeam,
    Column::YearsExisted,
];

/// Color columns for the bar chart
pub const BAR_COLORS: &[Column] = MAP_COLORS;

/// Y-axis columns for both scatter plots
pub const SCATTER_Y: &[Column] = &[
    Column::Points,
    Column::Mvps,
    Column::FinalsMvps,
    Column::AllNbaFirstTeam,
    Column::YearsExisted,
    Column::Founded,
    Column::Championships,
];

/// Color columns for the championships scatter plot
pub const SCATTER_COLORS: &[Column] = &[
    Column::Team,
    Column::State,
    Column::Points,
    Column::Mvps,
    Column::FinalsMvps,
    Column::AllNbaFirstTeam,
    Column::YearsExisted,
    Column::Founded,
    Column::Championships,
];

/// Marker size columns for the team age scatter plot
pub const SCATTER2_SIZES: &[Column] = &[
    Column::Points,
    Column::Mvps,
    Column::FinalsMvps,
    Column::AllNbaFirstTeam,
    Column::Championships,
    Column::LeadingScorer,
];

const MAP_HOVER: &[Column] = &[
    Column::Points,
    Column::Mvps,
    Column::FinalsMvps,
    Column::AllNbaFirstTeam,
    Column::LeadingScorer,
];

const BAR_HOVER: &[Column] = &[
    Column::Championships,
    Column::LeadingScorer,
    Column::AllNbaFirstTeam,
    Column::Mvps,
    Column::FinalsMvps,
];

const SCATTER_HOVER: &[Column] = &[
    Column::LeadingScorer,
    Column::Mvps,
    Column::FinalsMvps,
    Column::Team,
];

/// Plotly's default qualitative palette
const PALETTE: [&str; 10] = [
    "#636efa", "#EF553B", "#00cc96", "#ab63fa", "#FFA15A", "#19d3f3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

const CONTINUOUS_SCALE: &str = "Viridis";
const TRENDLINE_COLOR: &str = "#444444";
const SCATTER2_MAX_MARKER: f64 = 15.0;

/// Choropleth of the county aggregates, colored by `color`
pub fn county_map(ctx: &DataContext, color: Column) -> ChartResult<Figure> {
    require("county map", color, MAP_COLORS)?;

    let regions = ctx.regions();
    let hovertemplate = format!(
        "<b>%{{hovertext}}</b><br><br>fips=%{{location}}<br>{}=%{{z}}{}<extra></extra>",
        color,
        hover_lines(MAP_HOVER)
    );

    let trace = ChoroplethTrace {
        geojson: Arc::clone(ctx.counties()),
        featureidkey: "id".to_string(),
        locations: regions.iter().map(RegionRecord::fips_code).collect(),
        z: regions
            .iter()
            .map(|r| r.number(color).unwrap_or_default())
            .collect(),
        colorscale: "Reds".to_string(),
        colorbar: ColorBar {
            title: Title::new(color.header()),
        },
        hovertext: regions.iter().map(|r| r.teams.clone()).collect(),
        customdata: regions
            .iter()
            .map(|r| {
                MAP_HOVER
                    .iter()
                    .map(|c| CellValue::Number(r.number(*c).unwrap_or_default()))
                    .collect()
            })
            .collect(),
        hovertemplate,
    };

    Ok(Figure {
        data: vec![Trace::Choropleth(trace)],
        layout: Layout {
            title: Some(Title::new("NBA Teams")),
            margin: Some(Margin::uniform(0)),
            geo: Some(Geo {
                scope: "usa".to_string(),
                fitbounds: "locations".to_string(),
                visible: true,
            }),
            ..Default::default()
        },
    })
}

/// Share of all-time points per state, bars colored by `color`
pub fn bar_chart(ctx: &DataContext, color: Column) -> ChartResult<Figure> {
    require("bar chart", color, BAR_COLORS)?;

    let teams = ctx.teams();
    let hovertemplate = format!(
        "State=%{{x}}<br>Percent=%{{y}}<br>text=%{{text}}<br>{}=%{{marker.color}}{}<extra></extra>",
        color,
        hover_lines(BAR_HOVER)
    );

    let trace = BarTrace {
        x: teams.iter().map(|t| t.state.clone()).collect(),
        y: numbers(teams, Column::PercentageOfPoints),
        text: teams.iter().map(|t| t.text.clone()).collect(),
        marker: Marker {
            color: Some(MarkerColor::Values(numbers(teams, color))),
            colorscale: Some(CONTINUOUS_SCALE.to_string()),
            showscale: Some(true),
            colorbar: Some(ColorBar {
                title: Title::new(color.header()),
            }),
            line: Some(Line {
                width: Some(2.0),
                color: None,
            }),
            ..Default::default()
        },
        customdata: customdata(teams, BAR_HOVER),
        hovertemplate,
    };

    Ok(Figure {
        data: vec![Trace::Bar(trace)],
        layout: Layout {
            title: Some(Title::centered(
                "Percentage of Total Points Scored by State in NBA History",
            )),
            xaxis: Some(Axis::titled("State")),
            yaxis: Some(Axis::titled("Percent")),
            ..Default::default()
        },
    })
}

/// Championships against `y`, points colored by `color`, with an OLS
/// trendline over all teams
pub fn scatter(ctx: &DataContext, y: Column, color: Column) -> ChartResult<Figure> {
    require("championships scatter plot", y, SCATTER_Y)?;
    require("championships scatter plot", color, SCATTER_COLORS)?;

    let teams = ctx.teams();
    let x_label = Column::Championships;
    let xs = numbers(teams, x_label);
    let ys = numbers(teams, y);

    let mut data = if color.is_numeric() {
        let hovertemplate = format!(
            "{}=%{{x}}<br>{}=%{{y}}<br>{}=%{{marker.color}}{}<extra></extra>",
            x_label,
            y,
            color,
            hover_lines(SCATTER_HOVER)
        );
        vec![Trace::Scatter(ScatterTrace {
            x: xs.clone(),
            y: ys.clone(),
            mode: "markers".to_string(),
            marker: Some(Marker {
                color: Some(MarkerColor::Values(numbers(teams, color))),
                colorscale: Some(CONTINUOUS_SCALE.to_string()),
                showscale: Some(true),
                colorbar: Some(ColorBar {
                    title: Title::new(color.header()),
                }),
                ..Default::default()
            }),
            customdata: customdata(teams, SCATTER_HOVER),
            hovertemplate,
            ..Default::default()
        })]
    } else {
        categorical_traces(teams, x_label, y, color)
    };

    data.extend(trendline_trace(&xs, &ys, x_label, y));

    Ok(Figure {
        data,
        layout: Layout {
            title: Some(Title::new("# of Championships Against...")),
            width: Some(600),
            height: Some(600),
            showlegend: Some(false),
            xaxis: Some(Axis::titled(x_label.header())),
            yaxis: Some(Axis::titled(y.header())),
            ..Default::default()
        },
    })
}

/// Team age against `y`, one color per team, marker area by `size`, with an
/// OLS trendline over all teams
pub fn scatter2(ctx: &DataContext, y: Column, size: Column) -> ChartResult<Figure> {
    require("team age scatter plot", y, SCATTER_Y)?;
    require("team age scatter plot", size, SCATTER2_SIZES)?;

    let teams = ctx.teams();
    let x_label = Column::YearsExisted;
    let xs = numbers(teams, x_label);
    let ys = numbers(teams, y);
    let sizes = numbers(teams, size);

    let max_size = sizes.iter().copied().fold(0.0_f64, f64::max);
    // Same scaling Plotly Express uses for `size_max`
    let sizeref = if max_size > 0.0 {
        2.0 * max_size / (SCATTER2_MAX_MARKER * SCATTER2_MAX_MARKER)
    } else {
        1.0
    };

    let mut team_colors: HashMap<&str, &str> = HashMap::new();
    let colors = teams
        .iter()
        .map(|t| {
            let next = PALETTE[team_colors.len() % PALETTE.len()];
            team_colors.entry(t.team.as_str()).or_insert(next).to_string()
        })
        .collect();

    let hovertemplate = format!(
        "{}=%{{x}}<br>{}=%{{y}}<br>{}=%{{marker.size}}{}<extra></extra>",
        x_label,
        y,
        size,
        hover_lines(SCATTER_HOVER)
    );

    let mut data = vec![Trace::Scatter(ScatterTrace {
        x: xs.clone(),
        y: ys.clone(),
        mode: "markers".to_string(),
        marker: Some(Marker {
            color: Some(MarkerColor::PerPoint(colors)),
            size: Some(MarkerSize::PerPoint(sizes)),
            sizemode: Some("area".to_string()),
            sizeref: Some(sizeref),
            ..Default::default()
        }),
        customdata: customdata(teams, SCATTER_HOVER),
        hovertemplate,
        ..Default::default()
    })];

    data.extend(trendline_trace(&xs, &ys, x_label, y));

    Ok(Figure {
        data,
        layout: Layout {
            title: Some(Title::new("Age of Team Against...")),
            width: Some(800),
            height: Some(800),
            showlegend: Some(false),
            xaxis: Some(Axis::titled(x_label.header())),
            yaxis: Some(Axis::titled(y.header())),
            ..Default::default()
        },
    })
}

/// Every raw column as a plain table
pub fn table(ctx: &DataContext) -> Figure {
    let teams = ctx.teams();

    let trace = TableTrace {
        header: TableHeader {
            values: Column::ALL.iter().map(|c| c.header().to_string()).collect(),
            fill: Fill {
                color: "lavender".to_string(),
            },
            align: "left".to_string(),
        },
        cells: TableCells {
            values: Column::ALL
                .iter()
                .map(|c| teams.iter().map(|t| t.value(*c)).collect())
                .collect(),
            fill: Fill {
                color: "lightgrey".to_string(),
            },
            align: "left".to_string(),
        },
    };

    Figure {
        data: vec![Trace::Table(trace)],
        layout: Layout {
            autosize: Some(false),
            width: Some(1200),
            height: Some(800),
            margin: Some(Margin::uniform(10)),
            ..Default::default()
        },
    }
}

fn require(chart: &'static str, column: Column, allowed: &[Column]) -> ChartResult<()> {
    if allowed.contains(&column) {
        Ok(())
    } else {
        Err(ChartError::unsupported(chart, column, allowed))
    }
}

fn numbers(teams: &[TeamRecord], column: Column) -> Vec<f64> {
    teams
        .iter()
        .map(|t| t.number(column).unwrap_or_default())
        .collect()
}

fn customdata(teams: &[TeamRecord], columns: &[Column]) -> Vec<Vec<CellValue>> {
    teams
        .iter()
        .map(|t| columns.iter().map(|c| t.value(*c)).collect())
        .collect()
}

/// `<br>Name=%{customdata[i]}` for each hover column
fn hover_lines(columns: &[Column]) -> String {
    columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("<br>{}=%{{customdata[{}]}}", c, i))
        .collect()
}

/// One marker trace per distinct value of a text column, in order of first
/// appearance
fn categorical_traces(teams: &[TeamRecord], x: Column, y: Column, color: Column) -> Vec<Trace> {
    let mut groups: Vec<(String, Vec<&TeamRecord>)> = Vec::new();
    for team in teams {
        let key = team.value(color).to_string();
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(team),
            None => groups.push((key, vec![team])),
        }
    }

    groups
        .into_iter()
        .enumerate()
        .map(|(i, (name, members))| {
            let members: Vec<TeamRecord> = members.into_iter().cloned().collect();
            Trace::Scatter(ScatterTrace {
                x: numbers(&members, x),
                y: numbers(&members, y),
                mode: "markers".to_string(),
                marker: Some(Marker {
                    color: Some(MarkerColor::Single(PALETTE[i % PALETTE.len()].to_string())),
                    ..Default::default()
                }),
                customdata: customdata(&members, SCATTER_HOVER),
                hovertemplate: format!(
                    "{}={}<br>{}=%{{x}}<br>{}=%{{y}}{}<extra></extra>",
                    color,
                    name,
                    x,
                    y,
                    hover_lines(SCATTER_HOVER)
                ),
                name: Some(name),
                ..Default::default()
            })
        })
        .collect()
}

fn trendline_trace(xs: &[f64], ys: &[f64], x: Column, y: Column) -> Option<Trace> {
    let points: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
    let fit = ols(&points)?;

    let min_x = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let max_x = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(Trace::Scatter(ScatterTrace {
        x: vec![min_x, max_x],
        y: vec![fit.predict(min_x), fit.predict(max_x)],
        mode: "lines".to_string(),
        name: Some("OLS trendline".to_string()),
        line: Some(Line {
            width: Some(2.0),
            color: Some(TRENDLINE_COLOR.to_string()),
        }),
        hovertemplate: format!(
            "<b>OLS trendline</b><br>{} = {:.4} * {} + {:.4}<br>R<sup>2</sup>={:.6}<extra></extra>",
            y, fit.slope, x, fit.intercept, fit.r_squared
        ),
        ..Default::default()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::sample_context;

    fn scatter_traces(figure: &Figure) -> Vec<&ScatterTrace> {
        figure
            .data
            .iter()
            .filter_map(|t| match t {
                Trace::Scatter(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_county_map_uses_aggregates() {
        let ctx = sample_context();

        let figure = county_map(&ctx, Column::Points).unwrap();

        let Trace::Choropleth(trace) = &figure.data[0] else {
            panic!("expected a choropleth trace");
        };
        assert_eq!(trace.locations, vec!["06037", "17031", "36061"]);
        assert_eq!(trace.z, vec![760_000.0, 401_000.0, 398_000.0]);
        assert_eq!(trace.hovertext[0], "Los Angeles Lakers, Los Angeles Clippers");
        assert_eq!(trace.customdata[0].len(), MAP_HOVER.len());
        assert_eq!(trace.colorscale, "Reds");
        assert_eq!(figure.layout.margin, Some(Margin::uniform(0)));
    }

    #[test]
    fn test_county_map_serializes_geojson() {
        let ctx = sample_context();

        let json = serde_json::to_value(county_map(&ctx, Column::Mvps).unwrap()).unwrap();

        assert_eq!(json["data"][0]["type"], "choropleth");
        assert_eq!(json["data"][0]["featureidkey"], "id");
        assert_eq!(json["data"][0]["geojson"]["type"], "FeatureCollection");
        assert_eq!(json["layout"]["geo"]["scope"], "usa");
    }

    #[test]
    fn test_county_map_rejects_unsupported_column() {
        let ctx = sample_context();

        let err = county_map(&ctx, Column::Team).unwrap_err();

        assert!(matches!(
            err,
            ChartError::UnsupportedColumn {
                column: Column::Team,
                ..
            }
        ));
    }

    #[test]
    fn test_bar_chart() {
        let ctx = sample_context();

        let figure = bar_chart(&ctx, Column::YearsExisted).unwrap();

        let Trace::Bar(trace) = &figure.data[0] else {
            panic!("expected a bar trace");
        };
        assert_eq!(trace.x[0], "California");
        assert_eq!(trace.y[0], 12.5);
        assert_eq!(trace.text[3], "Bulls");
        assert_eq!(
            trace.marker.color,
            Some(MarkerColor::Values(vec![76.0, 53.0, 77.0, 57.0]))
        );
        assert_eq!(trace.marker.line.as_ref().and_then(|l| l.width), Some(2.0));
        assert_eq!(figure.layout.title.as_ref().and_then(|t| t.x), Some(0.5));
    }

    #[test]
    fn test_scatter_categorical_color_splits_traces() {
        let ctx = sample_context();

        let figure = scatter(&ctx, Column::Points, Column::State).unwrap();
        let traces = scatter_traces(&figure);

        // California, New York, Illinois, then the trendline
        assert_eq!(traces.len(), 4);
        assert_eq!(traces[0].name.as_deref(), Some("California"));
        assert_eq!(traces[0].x, vec![17.0, 0.0]);
        assert_eq!(traces[3].mode, "lines");
        assert_eq!(figure.layout.width, Some(600));
        assert_eq!(figure.layout.showlegend, Some(false));
    }

    #[test]
    fn test_scatter_numeric_color_single_trace() {
        let ctx = sample_context();

        let figure = scatter(&ctx, Column::Mvps, Column::Points).unwrap();
        let traces = scatter_traces(&figure);

        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0].y, vec![8.0, 1.0, 0.0, 5.0]);
        let marker = traces[0].marker.as_ref().unwrap();
        assert_eq!(marker.showscale, Some(true));
    }

    #[test]
    fn test_scatter2_marker_sizes() {
        let ctx = sample_context();

        let figure = scatter2(&ctx, Column::Championships, Column::Points).unwrap();
        let traces = scatter_traces(&figure);
        let marker = traces[0].marker.as_ref().unwrap();

        assert_eq!(marker.sizemode.as_deref(), Some("area"));
        assert_eq!(marker.sizeref, Some(4000.0));
        assert_eq!(traces[0].x, vec![76.0, 53.0, 77.0, 57.0]);
        match &marker.color {
            Some(MarkerColor::PerPoint(colors)) => {
                assert_eq!(colors.len(), 4);
                assert_ne!(colors[0], colors[1]);
            }
            other => panic!("unexpected marker color: {other:?}"),
        }
        assert_eq!(figure.layout.height, Some(800));
    }

    #[test]
    fn test_scatter2_rejects_text_size() {
        let ctx = sample_context();
        assert!(scatter2(&ctx, Column::Points, Column::Team).is_err());
    }

    #[test]
    fn test_table_has_every_column() {
        let ctx = sample_context();

        let figure = table(&ctx);

        let Trace::Table(trace) = &figure.data[0] else {
            panic!("expected a table trace");
        };
        assert_eq!(trace.header.values.len(), Column::ALL.len());
        assert_eq!(trace.header.values[0], "Team");
        assert_eq!(trace.cells.values.len(), Column::ALL.len());
        assert!(trace.cells.values.iter().all(|col| col.len() == 4));
        assert_eq!(trace.header.fill.color, "lavender");
        assert_eq!(figure.layout.autosize, Some(false));
    }

    #[test]
    fn test_every_allowed_column_builds() {
        let ctx = sample_context();

        for color in MAP_COLORS {
            county_map(&ctx, *color).unwrap();
            bar_chart(&ctx, *color).unwrap();
        }
        for y in SCATTER_Y {
            for color in SCATTER_COLORS {
                scatter(&ctx, *y, *color).unwrap();
            }
            for size in SCATTER2_SIZES {
                scatter2(&ctx, *y, *size).unwrap();
            }
        }
    }
}
