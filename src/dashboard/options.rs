//! Option Resolver
//!
//! Pure lookup tables from visualization kind to the columns each variable
//! dropdown may offer. Nothing here looks at the loaded data.

use serde::Serialize;

use super::kind::VisualizationKind;
use crate::charts::{BAR_COLORS, MAP_COLORS, SCATTER2_SIZES, SCATTER_COLORS, SCATTER_Y};
use crate::data::Column;

/// Label of the entry shown when a kind takes no second variable
pub const PLACEHOLDER_LABEL: &str = "No second variable";

/// One dropdown entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableOption {
    pub label: String,
    pub value: String,
}

impl VariableOption {
    /// The single entry of an otherwise empty second dropdown
    pub fn placeholder() -> Self {
        Self {
            label: PLACEHOLDER_LABEL.to_string(),
            value: String::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

impl From<Column> for VariableOption {
    fn from(column: Column) -> Self {
        Self {
            label: column.header().to_string(),
            value: column.header().to_string(),
        }
    }
}

/// Columns for the first variable dropdown. Never empty.
///
/// The table lists every column for reference; it always shows all of them.
pub fn primary_columns(kind: VisualizationKind) -> &'static [Column] {
    match kind {
        VisualizationKind::CountyMap => MAP_COLORS,
        VisualizationKind::BarChart => BAR_COLORS,
        VisualizationKind::Scatter | VisualizationKind::Scatter2 => SCATTER_Y,
        VisualizationKind::Table => &Column::ALL,
    }
}

/// Columns for the second variable dropdown, empty when the kind takes none
pub fn secondary_columns(kind: VisualizationKind) -> &'static [Column] {
    match kind {
        VisualizationKind::Scatter => SCATTER_COLORS,
        VisualizationKind::Scatter2 => SCATTER2_SIZES,
        VisualizationKind::CountyMap | VisualizationKind::BarChart | VisualizationKind::Table => {
            &[]
        }
    }
}

/// Options for the first dropdown; an unknown kind gets none
pub fn allowed_variables(kind: &str) -> Vec<VariableOption> {
    match kind.parse::<VisualizationKind>() {
        Ok(kind) => primary_options(kind),
        Err(_) => Vec::new(),
    }
}

/// Options for the second dropdown; the placeholder entry stands in for an
/// empty set
pub fn allowed_variables2(kind: &str) -> Vec<VariableOption> {
    match kind.parse::<VisualizationKind>() {
        Ok(kind) => secondary_options(kind),
        Err(_) => vec![VariableOption::placeholder()],
    }
}

pub fn primary_options(kind: VisualizationKind) -> Vec<VariableOption> {
    primary_columns(kind)
        .iter()
        .copied()
        .map(VariableOption::from)
        .collect()
}

pub fn secondary_options(kind: VisualizationKind) -> Vec<VariableOption> {
    let columns = secondary_columns(kind);
    if columns.is_empty() {
        return vec![VariableOption::placeholder()];
    }
    columns.iter().copied().map(VariableOption::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_never_empty_and_stable() {
        for kind in VisualizationKind::ALL {
            let first = allowed_variables(kind.value());
            assert!(!first.is_empty(), "{kind} has no options");
            assert_eq!(first, allowed_variables(kind.value()));
        }
    }

    #[test]
    fn test_secondary_placeholder() {
        for kind in [
            VisualizationKind::CountyMap,
            VisualizationKind::BarChart,
            VisualizationKind::Table,
        ] {
            let options = allowed_variables2(kind.value());
            assert_eq!(options, vec![VariableOption::placeholder()]);
        }

        let scatter = allowed_variables2("scatter");
        assert_eq!(scatter[0].value, "Team");
        assert!(scatter.iter().all(|o| !o.is_placeholder()));
    }

    #[test]
    fn test_unknown_kind() {
        assert!(allowed_variables("heatmap").is_empty());
        assert_eq!(
            allowed_variables2("heatmap"),
            vec![VariableOption::placeholder()]
        );
    }

    #[test]
    fn test_no_duplicate_columns() {
        for kind in VisualizationKind::ALL {
            for columns in [primary_columns(kind), secondary_columns(kind)] {
                let mut seen = columns.to_vec();
                seen.sort();
                seen.dedup();
                assert_eq!(seen.len(), columns.len(), "{kind} repeats a column");
            }
        }
    }

    #[test]
    fn test_bar_options_restored_after_switch() {
        let before = serde_json::to_vec(&allowed_variables("barchart")).unwrap();
        let _scatter = allowed_variables("scatter");
        let after = serde_json::to_vec(&allowed_variables("barchart")).unwrap();

        assert_eq!(before, after);
    }

    #[test]
    fn test_option_labels_are_headers() {
        let options = allowed_variables("countymap");
        assert_eq!(options[3].label, "All-NBA First Team Selections");
        assert_eq!(options[3].value, options[3].label);
    }
}
