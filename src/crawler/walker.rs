//! Pagination walker
//!
//! Drives one category's page chain to completion as an explicit state
//! machine: `Fetching -> Extracting -> Advancing -> {Fetching | Done}`.
//! Termination normally comes from the site omitting its "next" link; since
//! that cannot be proven from the client side, a configurable page cap
//! bounds the loop as well.

use crate::catalog::CatalogItem;
use crate::crawler::extractor::{extract_item, PageSelectors};
use crate::crawler::fetcher::{fetch_page, FetchError};
use reqwest::Client;
use scraper::Html;
use thiserror::Error;
use url::Url;

/// Walker states. The category's current URL travels with the state.
enum WalkState {
    Fetching(Url),
    Extracting { url: Url, body: String },
    Advancing { url: Url, next_href: Option<String> },
    Done,
}

/// Everything one category yielded, in page order.
#[derive(Debug, Default)]
pub struct CategoryHarvest {
    /// Extracted records, ordered as encountered.
    pub items: Vec<CatalogItem>,
    /// Item containers skipped because a field failed to extract.
    pub malformed: u32,
    /// Pages fetched for this category.
    pub pages: u32,
}

/// A failure that abandons the current category. The orchestrator records
/// it and continues with the next category.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("page {url} has no category heading")]
    MissingHeading { url: String },

    #[error("cannot resolve next-page link {href:?} against {url}: {source}")]
    NextLink {
        href: String,
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Outcome of extracting one page, before the walker advances.
struct PageExtract {
    items: Vec<CatalogItem>,
    malformed: u32,
    next_href: Option<String>,
}

pub struct PageWalker<'a> {
    client: &'a Client,
    selectors: &'a PageSelectors,
    max_pages: u32,
}

impl<'a> PageWalker<'a> {
    pub fn new(client: &'a Client, selectors: &'a PageSelectors, max_pages: u32) -> Self {
        Self {
            client,
            selectors,
            max_pages,
        }
    }

    /// Walks the page chain starting at `start_url` until the site omits a
    /// "next" link or the page cap is reached.
    pub async fn walk(&self, start_url: Url) -> Result<CategoryHarvest, WalkError> {
        let mut harvest = CategoryHarvest::default();
        let mut state = WalkState::Fetching(start_url);

        loop {
            state = match state {
                WalkState::Fetching(url) => {
                    tracing::debug!("fetching {}", url);
                    let body = fetch_page(self.client, &url).await?;
                    WalkState::Extracting { url, body }
                }

                WalkState::Extracting { url, body } => {
                    let page = self.extract_page(&url, &body)?;
                    harvest.pages += 1;
                    harvest.malformed += page.malformed;
                    harvest.items.extend(page.items);
                    WalkState::Advancing {
                        url,
                        next_href: page.next_href,
                    }
                }

                WalkState::Advancing { url, next_href } => match next_href {
                    Some(_) if harvest.pages >= self.max_pages => {
                        tracing::warn!(
                            "page cap ({}) reached at {}, truncating category",
                            self.max_pages,
                            url
                        );
                        WalkState::Done
                    }
                    Some(href) => {
                        // Handles both relative and absolute next links.
                        let next = url.join(&href).map_err(|source| WalkError::NextLink {
                            href,
                            url: url.to_string(),
                            source,
                        })?;
                        WalkState::Fetching(next)
                    }
                    None => WalkState::Done,
                },

                WalkState::Done => break,
            };
        }

        Ok(harvest)
    }

    /// One synchronous page-level pass: heading, item containers, next link.
    ///
    /// Kept out of the async loop so the parsed document never lives across
    /// an await point.
    fn extract_page(&self, url: &Url, body: &str) -> Result<PageExtract, WalkError> {
        let document = Html::parse_document(body);

        // The page's own heading is the authoritative category label, not
        // the navigation entry that led here.
        let category = document
            .select(&self.selectors.category_heading)
            .next()
            .map(|h| h.text().collect::<String>().trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| WalkError::MissingHeading {
                url: url.to_string(),
            })?;

        let mut items = Vec::new();
        let mut malformed = 0;
        for node in document.select(&self.selectors.item) {
            match extract_item(node, self.selectors, &category) {
                Ok(item) => items.push(item),
                Err(e) => {
                    tracing::warn!("skipping malformed item on {}: {}", url, e);
                    malformed += 1;
                }
            }
        }

        let next_href = document
            .select(&self.selectors.next_link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::to_string);

        Ok(PageExtract {
            items,
            malformed,
            next_href,
        })
    }
}
