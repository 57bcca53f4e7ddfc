//! ddg-search command line entry point.
//!
//! Runs a cached DuckDuckGo search or parses a saved results page and prints
//! the records as JSON on stdout. Logs go to stderr.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use duckparse_client::{SearchService, extract_results};
use duckparse_core::{AppConfig, ResultRecord};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ddg-search", version, about = "DuckDuckGo HTML results as JSON records")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print compact JSON instead of pretty-printed
    #[arg(long, global = true)]
    compact: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search DuckDuckGo and print the results
    Search {
        /// Search terms, joined with spaces
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Region code such as US, GB or DE (default: DDG_DEFAULT_REGION or US)
        #[arg(short, long)]
        region: Option<String>,
    },

    /// Parse a saved results page
    Parse {
        /// Path to the HTML file
        file: PathBuf,
    },
}

#[derive(Serialize, Debug)]
struct ParseOutput {
    count: usize,
    results: Vec<ResultRecord>,
}

fn parse_file(path: &Path) -> Result<ParseOutput> {
    let html = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let results = extract_results(&html);
    Ok(ParseOutput { count: results.len(), results })
}

fn to_json<T: Serialize>(value: &T, compact: bool) -> Result<String> {
    let json = if compact { serde_json::to_string(value)? } else { serde_json::to_string_pretty(value)? };
    Ok(json)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let json = match cli.command {
        Command::Search { query, region } => {
            let config = AppConfig::load()?;
            let service = SearchService::from_config(&config)?;
            let payload = service.search(&query.join(" "), region.as_deref(), false).await?;
            tracing::info!(count = payload.results.len(), "search complete");
            to_json(&payload, cli.compact)?
        }
        Command::Parse { file } => to_json(&parse_file(&file)?, cli.compact)?,
    };

    println!("{}", json);

    Ok(())
}
