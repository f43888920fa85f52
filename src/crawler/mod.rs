//! Ingestion pipeline
//!
//! Data flows orchestrator -> walker -> fetcher -> extractor -> repository:
//! the orchestrator enumerates categories, the walker drives each one's
//! page chain, and every extracted record is handed to the store with
//! duplicate titles skipped.

mod discovery;
mod extractor;
mod fetcher;
mod orchestrator;
mod walker;

pub use discovery::discover_categories;
pub use extractor::{extract_item, ExtractionError, PageSelectors};
pub use fetcher::{build_http_client, fetch_page, FetchError};
pub use orchestrator::{CategoryError, CrawlReport, Orchestrator};
pub use walker::{CategoryHarvest, PageWalker, WalkError};

use crate::config::Config;
use crate::storage::SqliteCatalog;
use std::sync::{Arc, Mutex};

/// Runs a complete ingestion against the configured site.
pub async fn run_ingest(
    config: Config,
    store: Arc<Mutex<SqliteCatalog>>,
) -> crate::Result<CrawlReport> {
    let orchestrator = Orchestrator::new(config, store)?;
    orchestrator.run().await
}
