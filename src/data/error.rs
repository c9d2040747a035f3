//! Data layer error types
//!
//! Every variant means the dashboard has no data to show. At startup they
//! are all reported as a single fatal "data unavailable" condition.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the dataset and boundaries
#[derive(Error, Debug)]
pub enum DataError {
    /// Request to a remote resource failed
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Remote resource answered with a non-success status
    #[error("Fetching {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Local resource could not be read
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV structure is broken (bad quoting, missing header row)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row could not be decoded into a team record
    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },

    /// Boundary file is not a GeoJSON FeatureCollection
    #[error("Invalid GeoJSON: {0}")]
    InvalidGeoJson(String),

    /// Resource decoded but held no usable rows
    #[error("No data in {0}")]
    Empty(String),
}

impl From<geojson::Error> for DataError {
    fn from(err: geojson::Error) -> Self {
        DataError::InvalidGeoJson(err.to_string())
    }
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DataError::Status {
            url: "https://example.com/nba_info.csv".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "Fetching https://example.com/nba_info.csv returned HTTP 404"
        );

        let err = DataError::InvalidRecord {
            line: 3,
            reason: "expected a count, got 'many'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid record at line 3: expected a count, got 'many'"
        );
    }

    #[test]
    fn test_geojson_error_conversion() {
        let parse_err = "not geojson".parse::<geojson::GeoJson>().unwrap_err();
        let data_err: DataError = parse_err.into();
        assert!(matches!(data_err, DataError::InvalidGeoJson(_)));
    }
}
