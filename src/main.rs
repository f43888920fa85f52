//! Bookgrab main entry point
//!
//! Command-line interface for the catalog ingester and its query service.

use bookgrab::config::{load_config_with_hash, Config};
use bookgrab::crawler::run_ingest;
use bookgrab::storage::{open_catalog, CatalogStore, SqliteCatalog};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

/// Bookgrab: a bookshop catalog ingester
///
/// Crawls a category-organized book catalog into SQLite, skipping titles
/// that are already stored, and can serve the result back over HTTP.
#[derive(Parser, Debug)]
#[command(name = "bookgrab")]
#[command(version)]
#[command(about = "Book catalog ingester and query service", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Start the query API instead of running an ingestion
    #[arg(long, conflicts_with = "stats")]
    serve: bool,

    /// Show catalog statistics and exit
    #[arg(long, conflicts_with = "serve")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)?;
    tracing::info!("Configuration loaded (hash: {})", config_hash);

    if cli.stats {
        handle_stats(&config)?;
    } else if cli.serve {
        handle_serve(config).await?;
    } else {
        handle_ingest(config).await?;
    }

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("bookgrab=info,warn"),
            1 => EnvFilter::new("bookgrab=debug,info"),
            2 => EnvFilter::new("bookgrab=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn open_store(config: &Config) -> anyhow::Result<SqliteCatalog> {
    Ok(open_catalog(Path::new(&config.output.database_path))?)
}

/// Handles the default mode: run a full ingestion and print the report
async fn handle_ingest(config: Config) -> anyhow::Result<()> {
    let store = Arc::new(Mutex::new(open_store(&config)?));

    let report = run_ingest(config, store).await?;

    println!("=== Ingestion Report ===");
    println!("{}", report);

    Ok(())
}

/// Handles the --serve mode: run the query API until interrupted
async fn handle_serve(config: Config) -> anyhow::Result<()> {
    let store = Arc::new(Mutex::new(open_store(&config)?));
    bookgrab::api::serve(&config.api, store).await?;
    Ok(())
}

/// Handles the --stats mode: show catalog counts and exit
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config)?;

    println!("Database: {}", config.output.database_path);
    println!("Items: {}", store.count_items()?);

    let categories = store.list_categories()?;
    println!("Categories ({}):", categories.len());
    for category in &categories {
        println!("  - {}", category);
    }

    Ok(())
}
