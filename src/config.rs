//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::ApiConfig as ServerConfig;
use crate::data::{DataSource, LoaderConfig, DEFAULT_COUNTIES_URL, DEFAULT_TEAMS_URL};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dataset locations
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Franchise CSV: URL or local path
    #[serde(default = "default_teams")]
    pub teams: String,

    /// County GeoJSON: URL or local path
    #[serde(default = "default_counties")]
    pub counties: String,

    #[serde(default = "default_fetch_timeout")]
    pub request_timeout_secs: u64,
}

fn default_teams() -> String {
    DEFAULT_TEAMS_URL.to_string()
}

fn default_counties() -> String {
    DEFAULT_COUNTIES_URL.to_string()
}

fn default_fetch_timeout() -> u64 {
    30
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            teams: default_teams(),
            counties: default_counties(),
            request_timeout_secs: default_fetch_timeout(),
        }
    }
}

impl DataConfig {
    /// Loader settings for these locations
    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            teams: DataSource::parse(&self.teams),
            counties: DataSource::parse(&self.counties),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8050
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Server settings for this section
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Whether JSON output was requested
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// Runs before logging is set up, so nothing is logged here; the caller
    /// reports the outcome from the returned [`LoadedConfig`].
    pub fn load_default() -> LoadedConfig {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("courtside").join("config.toml")),
            Some(PathBuf::from("/etc/courtside/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// Load the first existing file that parses, remembering the ones that
    /// did not
    pub fn load_first(paths: &[PathBuf]) -> LoadedConfig {
        let mut skipped = Vec::new();

        for path in paths {
            if !path.exists() {
                continue;
            }
            match Self::load_with_env(path) {
                Ok(config) => {
                    return LoadedConfig {
                        config,
                        source: Some(path.clone()),
                        skipped,
                    }
                }
                Err(e) => skipped.push(e),
            }
        }

        LoadedConfig {
            config: Self::from_env(),
            source: None,
            skipped,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Data overrides
        if let Ok(teams) = std::env::var("COURTSIDE_DATA_TEAMS") {
            self.data.teams = teams;
        }
        if let Ok(counties) = std::env::var("COURTSIDE_DATA_COUNTIES") {
            self.data.counties = counties;
        }

        // API overrides
        if let Ok(host) = std::env::var("COURTSIDE_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("COURTSIDE_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("COURTSIDE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("COURTSIDE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Result of searching the default config locations
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the config came from, `None` for defaults plus environment
    pub source: Option<PathBuf>,
    /// Files that existed but could not be loaded
    pub skipped: Vec<ConfigError>,
}

impl LoadedConfig {
    /// Report where the config came from; call once logging is up
    pub fn log(&self) {
        for error in &self.skipped {
            tracing::warn!("{}", error);
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    format!(
        r#"# Courtside Configuration
#
# Environment variables override these settings:
# - COURTSIDE_DATA_TEAMS
# - COURTSIDE_DATA_COUNTIES
# - COURTSIDE_API_HOST
# - COURTSIDE_API_PORT
# - COURTSIDE_LOG_LEVEL
# - COURTSIDE_LOG_FORMAT

[data]
# Franchise table (URL or local path)
teams = "{teams}"

# County boundaries (URL or local path)
counties = "{counties}"

# Timeout for each download (seconds)
request_timeout_secs = 30

[api]
# Dashboard host
host = "0.0.0.0"

# Dashboard port
port = 8050

# Allowed CORS origins (empty = same origin only)
cors_origins = []

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#,
        teams = DEFAULT_TEAMS_URL,
        counties = DEFAULT_COUNTIES_URL,
    )
}
