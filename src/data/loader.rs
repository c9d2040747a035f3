//! Data Loader
//!
//! Fetches the franchise CSV and the county GeoJSON once at startup.
//! Each resource is either an http(s) URL or a local file path, so the
//! dashboard also runs offline against a downloaded copy.

use geojson::{feature::Id, FeatureCollection, GeoJson};
use reqwest::Client;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use super::context::DataContext;
use super::error::{DataError, DataResult};
use super::types::TeamRecord;

/// Default location of the franchise table
pub const DEFAULT_TEAMS_URL: &str =
    "https://raw.githubusercontent.com/DevlinBridges/dash-heroku-template/master/nba_info.csv";

/// Default location of the county boundaries
pub const DEFAULT_COUNTIES_URL: &str =
    "https://raw.githubusercontent.com/plotly/datasets/master/geojson-counties-fips.json";

/// Where a resource is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Fetched over HTTP
    Url(String),
    /// Read from disk
    File(PathBuf),
}

impl DataSource {
    /// Interpret a configured location: `http://` and `https://` are URLs,
    /// `file://` and anything else is a path
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            DataSource::Url(location.to_string())
        } else {
            let path = location.strip_prefix("file://").unwrap_or(location);
            DataSource::File(PathBuf::from(path))
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Url(url) => f.write_str(url),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Loader configuration
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Franchise CSV location
    pub teams: DataSource,
    /// County GeoJSON location
    pub counties: DataSource,
    /// Timeout for each remote fetch
    pub request_timeout: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            teams: DataSource::Url(DEFAULT_TEAMS_URL.to_string()),
            counties: DataSource::Url(DEFAULT_COUNTIES_URL.to_string()),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Loads the two resources and builds the data context
pub struct DataLoader {
    client: Client,
    config: LoaderConfig,
}

impl DataLoader {
    /// Create a loader with the given configuration
    pub fn new(config: LoaderConfig) -> DataResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|source| DataError::Fetch {
                url: "<client>".to_string(),
                source,
            })?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Fetch both resources concurrently and build the context
    pub async fn load(&self) -> DataResult<DataContext> {
        tracing::info!(teams = %self.config.teams, counties = %self.config.counties, "Loading data");

        let (teams_text, counties_text) = tokio::try_join!(
            self.read_source(&self.config.teams),
            self.read_source(&self.config.counties),
        )?;

        let teams = parse_teams(&teams_text)?;
        let counties = parse_counties(&counties_text)?;

        let ctx = DataContext::new(teams, counties)?;
        warn_unmatched_regions(&ctx);

        tracing::info!("Loaded {}", ctx.stats());
        Ok(ctx)
    }

    async fn read_source(&self, source: &DataSource) -> DataResult<String> {
        match source {
            DataSource::Url(url) => self.fetch(url).await,
            DataSource::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| DataError::Io {
                        path: path.clone(),
                        source,
                    })
            }
        }
    }

    async fn fetch(&self, url: &str) -> DataResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| DataError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| DataError::Fetch {
            url: url.to_string(),
            source,
        })?;

        tracing::debug!(url = %url, bytes = body.len(), "Fetched resource");
        Ok(body)
    }
}

/// Decode the franchise table
///
/// Extra columns are ignored. Header cells are trimmed so a stray space in
/// the file does not hide a column.
pub fn parse_teams(csv_data: &str) -> DataResult<Vec<TeamRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(csv_data.as_bytes());

    let mut teams = Vec::new();
    for result in reader.deserialize::<TeamRecord>() {
        match result {
            Ok(record) => teams.push(record),
            Err(e) => {
                if let csv::ErrorKind::Deserialize { pos, err } = e.kind() {
                    return Err(DataError::InvalidRecord {
                        line: pos.as_ref().map(|p| p.line()).unwrap_or(0),
                        reason: err.to_string(),
                    });
                }
                return Err(e.into());
            }
        }
    }

    if teams.is_empty() {
        return Err(DataError::Empty("team table".to_string()));
    }

    Ok(teams)
}

/// Decode the county boundaries, which must be a FeatureCollection
pub fn parse_counties(json: &str) -> DataResult<FeatureCollection> {
    match json.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => {
            let missing_ids = collection
                .features
                .iter()
                .filter(|f| f.id.is_none())
                .count();
            if missing_ids > 0 {
                tracing::warn!(missing_ids, "Boundary features without an id cannot be colored");
            }
            Ok(collection)
        }
        GeoJson::Feature(_) => Err(DataError::InvalidGeoJson(
            "expected a FeatureCollection, found a single Feature".to_string(),
        )),
        GeoJson::Geometry(_) => Err(DataError::InvalidGeoJson(
            "expected a FeatureCollection, found a bare Geometry".to_string(),
        )),
    }
}

/// Feature ids of a collection, as the strings the map matches against
pub fn feature_ids(collection: &FeatureCollection) -> HashSet<String> {
    collection
        .features
        .iter()
        .filter_map(|f| match &f.id {
            Some(Id::String(s)) => Some(s.clone()),
            Some(Id::Number(n)) => Some(n.to_string()),
            None => None,
        })
        .collect()
}

fn warn_unmatched_regions(ctx: &DataContext) {
    let ids = feature_ids(ctx.counties());
    for region in ctx.regions() {
        let code = region.fips_code();
        if !ids.contains(&code) {
            tracing::warn!(fips = %code, teams = %region.teams, "No boundary feature for county");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{SAMPLE_COUNTIES, SAMPLE_CSV};
    use axum::{routing::get, Router};
    use std::io::Write;

    /// Serve the sample resources on an ephemeral local port
    async fn serve_samples() -> String {
        let app = Router::new()
            .route("/nba_info.csv", get(|| async { SAMPLE_CSV }))
            .route("/counties.json", get(|| async { SAMPLE_COUNTIES }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    #[test]
    fn test_data_source_parse() {
        assert_eq!(
            DataSource::parse("https://example.com/a.csv"),
            DataSource::Url("https://example.com/a.csv".to_string())
        );
        assert_eq!(
            DataSource::parse("file:///tmp/a.csv"),
            DataSource::File(PathBuf::from("/tmp/a.csv"))
        );
        assert_eq!(
            DataSource::parse("data/nba_info.csv"),
            DataSource::File(PathBuf::from("data/nba_info.csv"))
        );
    }

    #[test]
    fn test_parse_teams() {
        let teams = parse_teams(SAMPLE_CSV).unwrap();

        assert_eq!(teams.len(), 4);
        assert_eq!(teams[0].team, "Los Angeles Lakers");
        assert_eq!(teams[0].fips, 6037);
        assert_eq!(teams[0].points, 450_000);
        assert_eq!(teams[0].percentage_of_points, 12.5);
        assert_eq!(teams[2].mvps, 0);
    }

    #[test]
    fn test_parse_teams_invalid_number() {
        let csv = "Team,State,fips,Founded,Yrs Existed,Championships,Points,MVPs,Finals MVPs,All-NBA First Team Selections,Leading Scorer,Percentage of Points Scored,text\n\
                   Bulls,Illinois,17031,1966,57,6,400000,5,6,10,10,3.1,Bulls\n\
                   Hawks,Georgia,13121,1946,77,1,many,1,0,4,2,3.0,Hawks\n";

        let err = parse_teams(csv).unwrap_err();
        match err {
            DataError::InvalidRecord { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("many"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_teams_missing_column() {
        let csv = "Team,State\nBulls,Illinois\n";
        assert!(matches!(
            parse_teams(csv),
            Err(DataError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn test_parse_teams_header_only() {
        let csv = "Team,State,fips,Founded,Yrs Existed,Championships,Points,MVPs,Finals MVPs,All-NBA First Team Selections,Leading Scorer,Percentage of Points Scored,text\n";
        assert!(matches!(parse_teams(csv), Err(DataError::Empty(_))));
    }

    #[test]
    fn test_parse_counties() {
        let collection = parse_counties(SAMPLE_COUNTIES).unwrap();
        let ids = feature_ids(&collection);

        assert_eq!(collection.features.len(), 3);
        assert!(ids.contains("06037"));
        assert!(ids.contains("36061"));
    }

    #[test]
    fn test_parse_counties_rejects_single_feature() {
        let feature = r#"{"type":"Feature","id":"01001","properties":{},"geometry":null}"#;
        assert!(matches!(
            parse_counties(feature),
            Err(DataError::InvalidGeoJson(_))
        ));
    }

    #[tokio::test]
    async fn test_load_from_files() {
        let mut teams_file = tempfile::NamedTempFile::new().unwrap();
        teams_file.write_all(SAMPLE_CSV.as_bytes()).unwrap();
        let mut counties_file = tempfile::NamedTempFile::new().unwrap();
        counties_file.write_all(SAMPLE_COUNTIES.as_bytes()).unwrap();

        let loader = DataLoader::new(LoaderConfig {
            teams: DataSource::File(teams_file.path().to_path_buf()),
            counties: DataSource::File(counties_file.path().to_path_buf()),
            ..Default::default()
        })
        .unwrap();

        let ctx = loader.load().await.unwrap();

        assert_eq!(ctx.teams().len(), 4);
        assert_eq!(ctx.regions().len(), 3);
        let la = ctx.regions().iter().find(|r| r.fips == 6037).unwrap();
        assert_eq!(la.teams, "Los Angeles Lakers, Los Angeles Clippers");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let loader = DataLoader::new(LoaderConfig {
            teams: DataSource::File(dir.path().join("missing.csv")),
            counties: DataSource::File(dir.path().join("missing.json")),
            ..Default::default()
        })
        .unwrap();

        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[tokio::test]
    async fn test_load_from_urls() {
        let base = serve_samples().await;
        let loader = DataLoader::new(LoaderConfig {
            teams: DataSource::parse(&format!("{}/nba_info.csv", base)),
            counties: DataSource::parse(&format!("{}/counties.json", base)),
            request_timeout: Duration::from_secs(5),
        })
        .unwrap();

        let ctx = loader.load().await.unwrap();

        assert_eq!(ctx.teams().len(), 4);
        assert_eq!(ctx.regions().len(), 3);
        assert_eq!(ctx.counties().features.len(), 3);
    }

    #[tokio::test]
    async fn test_load_url_not_found() {
        let base = serve_samples().await;
        let missing = format!("{}/missing.csv", base);
        let loader = DataLoader::new(LoaderConfig {
            teams: DataSource::parse(&missing),
            counties: DataSource::parse(&format!("{}/counties.json", base)),
            request_timeout: Duration::from_secs(5),
        })
        .unwrap();

        let err = loader.load().await.unwrap_err();

        match err {
            DataError::Status { url, status } => {
                assert_eq!(status, 404);
                assert_eq!(url, missing);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
