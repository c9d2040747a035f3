//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dashboard::{Selection, VariableOption, VisualizationKind};

// ============================================
// DASHBOARD DTOs
// ============================================

/// Entry of the visualization dropdown
#[derive(Debug, Serialize)]
pub struct KindOption {
    pub label: String,
    pub value: String,
}

impl From<VisualizationKind> for KindOption {
    fn from(kind: VisualizationKind) -> Self {
        Self {
            label: kind.label().to_string(),
            value: kind.value().to_string(),
        }
    }
}

/// Visualization list response
#[derive(Debug, Serialize)]
pub struct VisualizationsResponse {
    /// Kinds in dropdown order
    pub kinds: Vec<KindOption>,
    /// Selection shown on first load
    pub default: Selection,
}

/// Options query parameters
#[derive(Debug, Deserialize)]
pub struct OptionsQuery {
    /// Visualization kind value
    #[serde(default)]
    pub kind: String,
}

/// Option lists for both variable dropdowns
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub kind: String,
    pub variable1: Vec<VariableOption>,
    pub variable2: Vec<VariableOption>,
}

/// Raw dropdown values, used both as a POST body and as query parameters
///
/// Missing values read as empty strings, which the update step resets.
#[derive(Debug, Default, Deserialize)]
pub struct SelectionRequest {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub variable1: String,
    /// Empty for the placeholder entry
    #[serde(default)]
    pub variable2: Option<String>,
}

impl SelectionRequest {
    pub fn variable2(&self) -> &str {
        self.variable2.as_deref().unwrap_or_default()
    }
}

// ============================================
// DATA DTOs
// ============================================

/// A table of rows
#[derive(Debug, Serialize)]
pub struct TableResponse<'a, T> {
    /// Number of rows
    pub total: usize,
    /// Rows in table order
    pub rows: &'a [T],
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: "healthy", "degraded" or "unhealthy"
    pub status: String,
    /// Team rows loaded
    pub teams: usize,
    /// Counties with at least one team
    pub regions: usize,
    /// Boundary features loaded
    pub counties: usize,
    /// When the data was loaded
    pub loaded_at: DateTime<Utc>,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Server version
    pub version: String,
}
