//! Data Context
//!
//! The loaded tables, built once at startup and only read afterwards.
//! Shared between handlers behind an `Arc`.

use chrono::{DateTime, Utc};
use geojson::FeatureCollection;
use std::sync::Arc;

use super::aggregate::aggregate_by_region;
use super::error::{DataError, DataResult};
use super::types::{RegionRecord, TeamRecord};

/// Immutable bundle of everything the chart builders read
#[derive(Debug)]
pub struct DataContext {
    teams: Vec<TeamRecord>,
    regions: Vec<RegionRecord>,
    counties: Arc<FeatureCollection>,
    loaded_at: DateTime<Utc>,
}

impl DataContext {
    /// Build the context from raw rows and boundaries, deriving the
    /// aggregated table
    pub fn new(teams: Vec<TeamRecord>, counties: FeatureCollection) -> DataResult<Self> {
        if teams.is_empty() {
            return Err(DataError::Empty("team table".to_string()));
        }

        let regions = aggregate_by_region(&teams);

        tracing::debug!(
            teams = teams.len(),
            regions = regions.len(),
            features = counties.features.len(),
            "Built data context"
        );

        Ok(Self {
            teams,
            regions,
            counties: Arc::new(counties),
            loaded_at: Utc::now(),
        })
    }

    /// Raw team rows, in file order
    pub fn teams(&self) -> &[TeamRecord] {
        &self.teams
    }

    /// Rows aggregated by county, ordered by fips
    pub fn regions(&self) -> &[RegionRecord] {
        &self.regions
    }

    /// County boundary polygons
    pub fn counties(&self) -> &Arc<FeatureCollection> {
        &self.counties
    }

    /// When the data was loaded
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Summary counts for health and logging
    pub fn stats(&self) -> DataStats {
        DataStats {
            teams: self.teams.len(),
            regions: self.regions.len(),
            counties: self.counties.features.len(),
        }
    }
}

/// Row counts of a loaded context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataStats {
    pub teams: usize,
    pub regions: usize,
    pub counties: usize,
}

impl std::fmt::Display for DataStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} teams, {} counties with teams, {} boundary features",
            self.teams, self.regions, self.counties
        )
    }
}
