//! Field extraction for one item container
//!
//! [`extract_item`] is a pure transform from a parsed item node to a
//! [`CatalogItem`]; each sub-extraction fails independently with the missing
//! field named, so one corrupt listing never loses the rest of its page.

use crate::catalog::{CatalogItem, RatingTier};
use crate::BookgrabError;
use scraper::{ElementRef, Selector};
use thiserror::Error;

/// Class token that marks the rating node without encoding a tier.
const RATING_MARKER: &str = "star-rating";

/// A malformed or missing field on one item container.
///
/// Recovered locally: the item is skipped and extraction continues with the
/// rest of the page.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("item container is missing its {field}")]
    MissingField { field: &'static str },

    #[error("rating class list leaves {count} candidate tokens, expected exactly one")]
    AmbiguousRating { count: usize },

    #[error("unrecognized rating tier {0:?}")]
    UnknownRating(String),
}

/// Precompiled selectors for listing pages.
///
/// Parsed once per run; the selector strings are fixed, so failure here
/// means the binary itself is broken rather than the remote markup.
pub struct PageSelectors {
    pub category_heading: Selector,
    pub item: Selector,
    pub next_link: Selector,
    title: Selector,
    image: Selector,
    price: Selector,
    availability: Selector,
    rating: Selector,
}

impl PageSelectors {
    pub fn new() -> crate::Result<Self> {
        Ok(Self {
            category_heading: sel("h1")?,
            item: sel("article.product_pod")?,
            next_link: sel("li.next > a")?,
            title: sel("h3")?,
            image: sel("img")?,
            price: sel("p.price_color")?,
            availability: sel("p.instock.availability")?,
            rating: sel("p.star-rating")?,
        })
    }
}

/// Parses a CSS selector, mapping the parse error into the crate error type.
pub(crate) fn sel(css: &str) -> crate::Result<Selector> {
    Selector::parse(css).map_err(|e| BookgrabError::Selector(format!("{css}: {e}")))
}

/// Collapses all interior whitespace runs to single spaces and trims.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts one [`CatalogItem`] from an item container node.
///
/// `category` is the enclosing page's heading text, which is the
/// authoritative category label for every item on that page.
pub fn extract_item(
    node: ElementRef<'_>,
    selectors: &PageSelectors,
    category: &str,
) -> Result<CatalogItem, ExtractionError> {
    let title = node
        .select(&selectors.title)
        .next()
        .map(|h| h.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(ExtractionError::MissingField { field: "title" })?;

    let image_path = node
        .select(&selectors.image)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(str::to_string)
        .ok_or(ExtractionError::MissingField { field: "image source" })?;

    let price = node
        .select(&selectors.price)
        .next()
        .map(|p| p.text().collect::<String>().trim().to_string())
        .filter(|p| !p.is_empty())
        .ok_or(ExtractionError::MissingField { field: "price" })?;

    let availability = node
        .select(&selectors.availability)
        .next()
        .map(|p| collapse_whitespace(&p.text().collect::<String>()))
        .filter(|a| !a.is_empty())
        .ok_or(ExtractionError::MissingField { field: "availability" })?;

    let rating_node = node
        .select(&selectors.rating)
        .next()
        .ok_or(ExtractionError::MissingField { field: "rating" })?;

    let tokens: Vec<&str> = rating_node
        .value()
        .classes()
        .filter(|class| *class != RATING_MARKER)
        .collect();

    if tokens.len() != 1 {
        return Err(ExtractionError::AmbiguousRating { count: tokens.len() });
    }

    let rating = RatingTier::from_class_token(tokens[0])
        .ok_or_else(|| ExtractionError::UnknownRating(tokens[0].to_string()))?;

    Ok(CatalogItem {
        title,
        price,
        rating,
        availability,
        category: category.trim().to_string(),
        image_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn extract_from(fragment: &str) -> Result<CatalogItem, ExtractionError> {
        let selectors = PageSelectors::new().unwrap();
        let document = Html::parse_fragment(fragment);
        let node = document
            .select(&selectors.item)
            .next()
            .expect("fixture must contain an item container");
        extract_item(node, &selectors, "Mystery")
    }

    const WELL_FORMED: &str = r#"
        <article class="product_pod">
            <div class="image_container">
                <img src="media/cache/a.jpg" alt="Sharp Objects">
            </div>
            <p class="star-rating Four"></p>
            <h3><a href="sharp-objects_997/index.html">Sharp Objects</a></h3>
            <div class="product_price">
                <p class="price_color">£47.82</p>
                <p class="instock availability">
                    In stock
                </p>
            </div>
        </article>"#;

    #[test]
    fn test_extracts_all_fields() {
        let item = extract_from(WELL_FORMED).unwrap();

        assert_eq!(item.title, "Sharp Objects");
        assert_eq!(item.price, "£47.82");
        assert_eq!(item.availability, "In stock");
        assert_eq!(item.image_path, "media/cache/a.jpg");
        assert_eq!(item.rating, RatingTier::Four);
        assert_eq!(item.category, "Mystery");
    }

    #[test]
    fn test_availability_whitespace_is_collapsed() {
        let fragment = WELL_FORMED.replace("In stock", "In stock\n    (22 available)");
        let item = extract_from(&fragment).unwrap();
        assert_eq!(item.availability, "In stock (22 available)");
    }

    #[test]
    fn test_image_path_kept_verbatim() {
        let item = extract_from(WELL_FORMED).unwrap();
        // Not resolved against any base URL
        assert!(item.image_path.starts_with("media/"));
    }

    #[test]
    fn test_missing_price_fails() {
        let fragment = WELL_FORMED.replace(r#"<p class="price_color">£47.82</p>"#, "");
        assert!(matches!(
            extract_from(&fragment),
            Err(ExtractionError::MissingField { field: "price" })
        ));
    }

    #[test]
    fn test_missing_rating_node_fails() {
        let fragment = WELL_FORMED.replace(r#"<p class="star-rating Four"></p>"#, "");
        assert!(matches!(
            extract_from(&fragment),
            Err(ExtractionError::MissingField { field: "rating" })
        ));
    }

    #[test]
    fn test_rating_with_no_tier_token_fails() {
        let fragment = WELL_FORMED.replace("star-rating Four", "star-rating");
        assert!(matches!(
            extract_from(&fragment),
            Err(ExtractionError::AmbiguousRating { count: 0 })
        ));
    }

    #[test]
    fn test_rating_with_two_tier_tokens_fails() {
        let fragment = WELL_FORMED.replace("star-rating Four", "star-rating Four Two");
        assert!(matches!(
            extract_from(&fragment),
            Err(ExtractionError::AmbiguousRating { count: 2 })
        ));
    }

    #[test]
    fn test_rating_outside_closed_set_fails() {
        let fragment = WELL_FORMED.replace("star-rating Four", "star-rating Eleven");
        assert!(matches!(
            extract_from(&fragment),
            Err(ExtractionError::UnknownRating(_))
        ));
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  In \n\t stock  "), "In stock");
        assert_eq!(collapse_whitespace(""), "");
    }
}
