//! Crawl orchestrator
//!
//! Enumerates categories from the site root and drives the pagination
//! walker over each one in discovery order, handing every yielded record to
//! the repository. Failures are isolated per category; only persistence
//! failures abort the run.

use crate::config::Config;
use crate::crawler::discovery::discover_categories;
use crate::crawler::extractor::PageSelectors;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::walker::PageWalker;
use crate::storage::{CatalogStore, SqliteCatalog, UpsertOutcome};
use crate::BookgrabError;
use reqwest::Client;
use std::fmt;
use std::sync::{Arc, Mutex};
use url::Url;

/// One abandoned category, with the cause, for the final report.
#[derive(Debug)]
pub struct CategoryError {
    pub category: String,
    pub cause: String,
}

/// Aggregate outcome of one ingestion run.
#[derive(Debug, Default)]
pub struct CrawlReport {
    /// Categories walked to completion (abandoned ones are not counted).
    pub categories_processed: u32,
    /// Records newly committed this run.
    pub items_inserted: u64,
    /// Records skipped because their title was already stored.
    pub items_skipped: u64,
    /// Item containers dropped due to extraction failures.
    pub items_malformed: u64,
    /// Category-level failures, in the order they occurred.
    pub errors: Vec<CategoryError>,
}

impl fmt::Display for CrawlReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Categories processed: {}", self.categories_processed)?;
        writeln!(f, "Items inserted:       {}", self.items_inserted)?;
        writeln!(f, "Items skipped:        {}", self.items_skipped)?;
        writeln!(f, "Malformed items:      {}", self.items_malformed)?;
        if self.errors.is_empty() {
            write!(f, "Errors:               none")?;
        } else {
            write!(f, "Errors ({}):", self.errors.len())?;
            for error in &self.errors {
                write!(f, "\n  - {}: {}", error.category, error.cause)?;
            }
        }
        Ok(())
    }
}

/// Owns the HTTP client and selector set for one run; the repository handle
/// is constructed by the caller and passed in with explicit lifecycle.
pub struct Orchestrator {
    config: Config,
    client: Client,
    selectors: PageSelectors,
    store: Arc<Mutex<SqliteCatalog>>,
}

impl Orchestrator {
    pub fn new(config: Config, store: Arc<Mutex<SqliteCatalog>>) -> crate::Result<Self> {
        let client = build_http_client(&config.crawler)?;
        let selectors = PageSelectors::new()?;

        Ok(Self {
            config,
            client,
            selectors,
            store,
        })
    }

    /// Runs a full ingestion and returns the report.
    ///
    /// The root fetch is the only page whose failure is fatal: without it
    /// there is no category list to work through. After that, a failed
    /// category is recorded and the run moves on; a persistence failure
    /// aborts immediately since further writes cannot be trusted.
    pub async fn run(&self) -> crate::Result<CrawlReport> {
        let root = Url::parse(&self.config.site.root_url)?;

        tracing::info!("fetching catalog root {}", root);
        let body = fetch_page(&self.client, &root)
            .await
            .map_err(BookgrabError::Fetch)?;

        let categories = discover_categories(&body, &root)?;
        tracing::info!("discovered {} categories", categories.len());

        let mut report = CrawlReport::default();
        let walker = PageWalker::new(
            &self.client,
            &self.selectors,
            self.config.crawler.max_pages_per_category,
        );

        for category in categories {
            tracing::info!("walking category {:?}", category.name);

            let harvest = match walker.walk(category.start_url.clone()).await {
                Ok(harvest) => harvest,
                Err(e) => {
                    tracing::warn!("category {:?} abandoned: {}", category.name, e);
                    report.errors.push(CategoryError {
                        category: category.name,
                        cause: e.to_string(),
                    });
                    continue;
                }
            };

            let mut inserted = 0u64;
            let mut skipped = 0u64;
            {
                let mut store = self.store.lock().unwrap();
                for item in &harvest.items {
                    match store.insert_if_absent(item)? {
                        UpsertOutcome::Inserted => inserted += 1,
                        UpsertOutcome::Skipped => skipped += 1,
                    }
                }
            }

            tracing::info!(
                "category {:?}: {} pages, {} inserted, {} skipped, {} malformed",
                category.name,
                harvest.pages,
                inserted,
                skipped,
                harvest.malformed
            );

            report.categories_processed += 1;
            report.items_inserted += inserted;
            report.items_skipped += skipped;
            report.items_malformed += u64::from(harvest.malformed);
        }

        Ok(report)
    }
}
