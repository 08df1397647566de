use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use monday_source::services::{MondaySource, SyncRunner};
use monday_source::types::{ResourceKind, SourceConfig};

#[derive(Parser)]
#[command(name = "monday-source-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Monday.com source connector - extracts the items, boards, teams, updates and users collections through the GraphQL API and emits them as JSON record lines for a downstream ingestion pipeline"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to the connector configuration JSON document (credentials, optional api_url/timeout/retry overrides)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configured credentials against the Monday API without reading any records
    Check,
    /// List the available streams with their primary key, pagination setup and requested field fragment
    Discover,
    /// Read the configured streams to exhaustion, printing one JSON record message per line on stdout
    Read {
        /// Restrict the sync to specific streams (repeatable; default: all five)
        #[arg(long = "stream")]
        streams: Vec<String>,
    },
}

fn load_config(path: Option<&Path>) -> Result<SourceConfig> {
    let path = path.context("--config <path> is required")?;
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid configuration document {}", path.display()))
}

fn parse_streams(names: &[String]) -> Result<Option<Vec<ResourceKind>>> {
    if names.is_empty() {
        return Ok(None);
    }
    names
        .iter()
        .map(|name| {
            ResourceKind::from_str(name).map_err(|_| {
                anyhow::anyhow!(
                    "Unknown stream {}; expected one of items, boards, teams, updates, users",
                    name
                )
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Records go to stdout, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let source = MondaySource::new(config);

    match cli.command {
        Commands::Check => {
            let (ok, error) = source.check_connection().await;
            if ok {
                println!("Connection check succeeded");
            } else {
                let reason = error
                    .map(|error| format!("{error:#}"))
                    .unwrap_or_else(|| "unknown failure".to_string());
                bail!("Connection check failed: {reason}");
            }
        }
        Commands::Discover => {
            for stream in source.streams()? {
                let descriptor = serde_json::json!({
                    "stream": stream.resource(),
                    "primary_key": stream.primary_key(),
                    "pagination_field": stream.resource().pagination_field(),
                    "fields": stream.field_fragment(),
                });
                println!("{descriptor}");
            }
        }
        Commands::Read { streams } => {
            let selected = parse_streams(&streams)?;
            let runner = SyncRunner::new(source);
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            let summary = runner.run(selected.as_deref(), &mut out).await?;
            tracing::info!(
                "Sync complete: {} records across {} streams",
                summary.total_records(),
                summary.records_per_stream.len()
            );
        }
    }

    Ok(())
}
