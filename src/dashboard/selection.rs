//! Selection State
//!
//! The three dropdown values. A `Selection` is always legal: both variables
//! belong to the option sets of its kind. Changing any value goes through
//! [`Selection::normalize`], which resets whatever fell out of range.

use serde::Serialize;

use super::kind::VisualizationKind;
use super::options::{primary_columns, secondary_columns};
use crate::data::Column;

/// First variable used when nothing legal was selected
pub const DEFAULT_VARIABLE: Column = Column::Points;

/// Current dropdown values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub kind: VisualizationKind,
    pub variable1: Column,
    /// `None` when the kind takes no second variable
    pub variable2: Option<Column>,
}

impl Default for Selection {
    fn default() -> Self {
        Self::normalize(VisualizationKind::default(), Some(DEFAULT_VARIABLE), None)
    }
}

impl Selection {
    /// Build a legal selection, keeping each variable when the kind allows
    /// it and resetting it to the first legal entry otherwise
    pub fn normalize(
        kind: VisualizationKind,
        variable1: Option<Column>,
        variable2: Option<Column>,
    ) -> Self {
        let primary = primary_columns(kind);
        let variable1 = variable1
            .filter(|c| primary.contains(c))
            .or_else(|| primary.first().copied())
            .unwrap_or(DEFAULT_VARIABLE);

        let secondary = secondary_columns(kind);
        let variable2 = variable2
            .filter(|c| secondary.contains(c))
            .or_else(|| secondary.first().copied());

        Self {
            kind,
            variable1,
            variable2,
        }
    }

    /// Switch to another kind, keeping the variables that stay legal
    pub fn with_kind(self, kind: VisualizationKind) -> Self {
        Self::normalize(kind, Some(self.variable1), self.variable2)
    }

    pub fn with_variable1(self, column: Column) -> Self {
        Self::normalize(self.kind, Some(column), self.variable2)
    }

    pub fn with_variable2(self, column: Option<Column>) -> Self {
        Self::normalize(self.kind, Some(self.variable1), column)
    }

    /// Whether both variables belong to the current option sets
    pub fn is_legal(&self) -> bool {
        let secondary = secondary_columns(self.kind);
        let variable2_ok = match self.variable2 {
            Some(c) => secondary.contains(&c),
            None => secondary.is_empty(),
        };
        primary_columns(self.kind).contains(&self.variable1) && variable2_ok
    }
}
