//! Courtside
//!
//! Loads the NBA franchise dataset and county boundaries, then serves the
//! dashboard.
//!
//! # Configuration
//!
//! Config file (`--config`, or the default locations) plus environment
//! variables:
//! - `COURTSIDE_DATA_TEAMS`: Franchise CSV URL or path
//! - `COURTSIDE_DATA_COUNTIES`: County GeoJSON URL or path
//! - `COURTSIDE_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `COURTSIDE_API_PORT`: Port to listen on (default: 8050)
//! - `COURTSIDE_LOG_LEVEL`, `COURTSIDE_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Overrides the configured log filter

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use courtside::api::{serve, AppState};
use courtside::config::{generate_default_config, Config, LoadedConfig, LoggingConfig};
use courtside::dashboard::render;
use courtside::data::{DataContext, DataLoader};

#[derive(Parser)]
#[command(name = "courtside")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interactive NBA franchise dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Host to bind to (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the data and serve the dashboard (default)
    Serve,

    /// Load the data and print one figure as Plotly JSON
    Render {
        /// Visualization: countymap, barchart, scatter, scatter2, table
        #[arg(default_value = "countymap")]
        kind: String,
        /// First variable (column name)
        #[arg(default_value = "Points")]
        variable1: String,
        /// Second variable (column name), for the scatter plots
        #[arg(default_value = "")]
        variable2: String,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Cli {
        command,
        config,
        host,
        port,
    } = Cli::parse();

    match command.unwrap_or(Commands::Serve) {
        Commands::Config { output } => write_default_config(output),
        Commands::Render {
            kind,
            variable1,
            variable2,
            output,
        } => {
            let config = load_config(config, host, port)?;
            let data = load_data(&config).await?;

            let figure = render(&data, &kind, &variable1, &variable2)?;
            let json = serde_json::to_string(&figure)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!("Wrote {} figure to {}", figure.trace_kind(), path.display());
                }
                None => println!("{}", json),
            }
            Ok(())
        }
        Commands::Serve => {
            let config = load_config(config, host, port)?;
            let data = Arc::new(load_data(&config).await?);

            let api_config = config.api.server_config();
            let state = AppState::new(data, api_config.clone());

            tracing::info!("Starting server on {}:{}", api_config.host, api_config.port);
            serve(state, &api_config).await?;
            tracing::info!("Courtside stopped");
            Ok(())
        }
    }
}

fn write_default_config(output: Option<PathBuf>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote default config to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Resolve the config and start logging, then report how the config was
/// found and apply the CLI overrides
fn load_config(
    path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<Config> {
    let loaded = match path {
        Some(path) => LoadedConfig {
            config: Config::load_with_env(&path)?,
            source: Some(path),
            skipped: Vec::new(),
        },
        None => Config::load_default(),
    };

    init_logging(&loaded.config.logging);

    tracing::info!("Courtside v{}", env!("CARGO_PKG_VERSION"));
    loaded.log();

    let mut config = loaded.config;
    if let Some(host) = host {
        config.api.host = host;
    }
    if let Some(port) = port {
        config.api.port = port;
    }

    Ok(config)
}

/// Fetch both resources; any failure is fatal
async fn load_data(config: &Config) -> anyhow::Result<DataContext> {
    let loader = DataLoader::new(config.data.loader_config())?;

    match loader.load().await {
        Ok(ctx) => Ok(ctx),
        Err(e) => {
            tracing::error!(error = %e, "Data unavailable");
            Err(anyhow::Error::new(e).context("Data unavailable"))
        }
    }
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("courtside={},tower_http=info", config.level))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
