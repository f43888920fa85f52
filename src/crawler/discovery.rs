//! Category discovery from the site root
//!
//! The root page carries a navigation sidebar listing every category. The
//! sidebar label is only used for reporting; the authoritative category name
//! for stored items is read from each listing page's own heading.

use crate::catalog::CategoryRef;
use crate::crawler::extractor::{collapse_whitespace, sel};
use scraper::Html;
use url::Url;

/// CSS path to the per-category links in the sidebar. The outer list entry
/// is the "all products" link and is deliberately not matched.
const SIDEBAR_LINKS: &str = "div.side_categories ul.nav-list ul li a";

/// Extracts the category list from the root page markup.
///
/// Links without an href, with an empty label, or with an unresolvable href
/// are skipped; discovery order is document order.
pub fn discover_categories(html: &str, base: &Url) -> crate::Result<Vec<CategoryRef>> {
    let selector = sel(SIDEBAR_LINKS)?;
    let document = Html::parse_document(html);

    let mut categories = Vec::new();
    for link in document.select(&selector) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };

        let name = collapse_whitespace(&link.text().collect::<String>());
        if name.is_empty() {
            continue;
        }

        match base.join(href) {
            Ok(start_url) => categories.push(CategoryRef { name, start_url }),
            Err(e) => {
                tracing::debug!("skipping category link {}: {}", href, e);
            }
        }
    }

    Ok(categories)
}
