//! Pair market maker - replay entry point.
//!
//! Reads JSON-lines venue events from a file or stdin, drives the engine
//! and reports the final state.

use anyhow::{Context, Result};
use clap::Parser;
use pairmm_bot::{AppConfig, Application};
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::info;

/// Pair market maker
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via PAIRMM_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// JSON-lines event file. Reads stdin when omitted.
    #[arg(short, long)]
    events: Option<PathBuf>,

    /// Print Prometheus metrics on exit
    #[arg(long)]
    metrics: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    pairmm_telemetry::init_logging()?;

    info!("Starting pairmm v{}", env!("CARGO_PKG_VERSION"));

    // CLI arg > PAIRMM_CONFIG env var > default path (defaults if absent)
    let config = match &args.config {
        Some(path) => {
            info!(config_path = %path, "Loading configuration");
            AppConfig::from_file(path)?
        }
        None => AppConfig::load()?,
    };
    info!(?config.maker, "Configuration loaded");

    let app = Application::new(config)?;

    let summary = match &args.events {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("failed to open event file {}", path.display()))?;
            app.run(BufReader::new(file)).await?
        }
        None => app.run(BufReader::new(tokio::io::stdin())).await?,
    };

    info!(summary = %serde_json::to_string(&summary)?, "Run complete");

    if args.metrics {
        print!("{}", pairmm_telemetry::Metrics::gather()?);
    }

    Ok(())
}
