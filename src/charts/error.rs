//! Chart builder error types

use thiserror::Error;

use crate::data::Column;

/// Errors raised when a builder is asked for a column it does not support
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    /// Column is outside the builder's allowed set
    #[error("Column '{column}' is not available for the {chart} (allowed: {allowed})")]
    UnsupportedColumn {
        chart: &'static str,
        column: Column,
        allowed: String,
    },

    /// Name does not match any table column
    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    /// Builder needs a second column and none was selected
    #[error("The {chart} needs a second variable")]
    MissingColumn { chart: &'static str },
}

impl ChartError {
    pub(crate) fn unsupported(chart: &'static str, column: Column, allowed: &[Column]) -> Self {
        let allowed = allowed
            .iter()
            .map(Column::header)
            .collect::<Vec<_>>()
            .join(", ");
        ChartError::UnsupportedColumn {
            chart,
            column,
            allowed,
        }
    }
}

/// Result type alias for chart builders
pub type ChartResult<T> = Result<T, ChartError>;
