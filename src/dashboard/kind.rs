//! Visualization kinds offered by the first dropdown

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The chart the user picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualizationKind {
    #[default]
    CountyMap,
    BarChart,
    Scatter,
    Scatter2,
    Table,
}

impl VisualizationKind {
    /// All kinds, in dropdown order
    pub const ALL: [VisualizationKind; 5] = [
        VisualizationKind::CountyMap,
        VisualizationKind::BarChart,
        VisualizationKind::Scatter,
        VisualizationKind::Scatter2,
        VisualizationKind::Table,
    ];

    /// Dropdown value
    pub fn value(&self) -> &'static str {
        match self {
            VisualizationKind::CountyMap => "countymap",
            VisualizationKind::BarChart => "barchart",
            VisualizationKind::Scatter => "scatter",
            VisualizationKind::Scatter2 => "scatter2",
            VisualizationKind::Table => "table",
        }
    }

    /// Dropdown label
    pub fn label(&self) -> &'static str {
        match self {
            VisualizationKind::CountyMap => "County Map",
            VisualizationKind::BarChart => "Barchart",
            VisualizationKind::Scatter => "Scatter Plot 1",
            VisualizationKind::Scatter2 => "Scatter Plot 2",
            VisualizationKind::Table => "Table",
        }
    }
}

impl fmt::Display for VisualizationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// Error returned for a kind name that is not offered
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown visualization: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for VisualizationKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VisualizationKind::ALL
            .iter()
            .copied()
            .find(|k| k.value() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}
