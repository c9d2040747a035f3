//! Chart Descriptions
//!
//! A typed subset of the Plotly figure schema. Builders fill these structs
//! and the page hands the serialized JSON straight to `Plotly.react`, so
//! field names follow Plotly's attribute names rather than Rust naming.

use geojson::FeatureCollection;
use serde::Serialize;
use std::sync::Arc;

use crate::data::CellValue;

/// A complete figure: traces plus layout
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    /// Figure kind tag of the first trace, for logging
    pub fn trace_kind(&self) -> &'static str {
        match self.data.first() {
            Some(Trace::Choropleth(_)) => "choropleth",
            Some(Trace::Bar(_)) => "bar",
            Some(Trace::Scatter(_)) => "scatter",
            Some(Trace::Table(_)) => "table",
            None => "empty",
        }
    }
}

/// One Plotly trace
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Choropleth(ChoroplethTrace),
    Bar(BarTrace),
    Scatter(ScatterTrace),
    Table(TableTrace),
}

/// Filled county polygons colored by a value
#[derive(Debug, Clone, Serialize)]
pub struct ChoroplethTrace {
    pub geojson: Arc<FeatureCollection>,
    pub featureidkey: String,
    pub locations: Vec<String>,
    pub z: Vec<f64>,
    pub colorscale: String,
    pub colorbar: ColorBar,
    pub hovertext: Vec<String>,
    pub customdata: Vec<Vec<CellValue>>,
    pub hovertemplate: String,
}

/// Vertical bars
#[derive(Debug, Clone, Serialize)]
pub struct BarTrace {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub text: Vec<String>,
    pub marker: Marker,
    pub customdata: Vec<Vec<CellValue>>,
    pub hovertemplate: String,
}

/// Markers and/or lines over numeric axes
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScatterTrace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub customdata: Vec<Vec<CellValue>>,
    pub hovertemplate: String,
}

/// Plain table of columns
#[derive(Debug, Clone, Serialize)]
pub struct TableTrace {
    pub header: TableHeader,
    pub cells: TableCells,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableHeader {
    pub values: Vec<String>,
    pub fill: Fill,
    pub align: String,
}

/// Cell values are column-major, one inner vector per column
#[derive(Debug, Clone, Serialize)]
pub struct TableCells {
    pub values: Vec<Vec<CellValue>>,
    pub fill: Fill,
    pub align: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Fill {
    pub color: String,
}

/// Marker styling shared by bars and scatter points
#[derive(Debug, Clone, Default, Serialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<MarkerColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showscale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorbar: Option<ColorBar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<MarkerSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizemode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizeref: Option<f64>,
}

/// A single color, a value per point mapped through a scale, or a color
/// per point
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MarkerColor {
    Single(String),
    Values(Vec<f64>),
    PerPoint(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MarkerSize {
    Fixed(f64),
    PerPoint(Vec<f64>),
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Line {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorBar {
    pub title: Title,
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            x: None,
        }
    }

    /// Title centered over the plot area
    pub fn centered(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            x: Some(0.5),
        }
    }
}

/// Figure layout
#[derive(Debug, Clone, Default, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autosize: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

impl Margin {
    pub fn uniform(px: u32) -> Self {
        Self {
            l: px,
            r: px,
            t: px,
            b: px,
        }
    }
}

/// Map projection settings
#[derive(Debug, Clone, Serialize)]
pub struct Geo {
    pub scope: String,
    pub fitbounds: String,
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub title: Title,
}

impl Axis {
    pub fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Title::new(text),
        }
    }
}
