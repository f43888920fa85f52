//! Domain types for the book catalog
//!
//! A [`CatalogItem`] is one product entry as observed on a listing page.
//! Items are identified by title: the repository never stores two rows with
//! the same title, and an item is never mutated after its first insertion.

use serde::Serialize;
use url::Url;

/// One product entry extracted from a listing page.
///
/// `price`, `availability` and `image_path` are stored verbatim as they
/// appear in the markup; the image path in particular is not resolved
/// against any base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    /// Natural identity key; non-empty, unique across the repository.
    pub title: String,
    /// Currency-formatted literal, e.g. `"£45.17"`. Never parsed to numeric.
    pub price: String,
    /// Star rating, validated against the closed five-value set.
    pub rating: RatingTier,
    /// Free-text stock status, whitespace-collapsed.
    pub availability: String,
    /// The enclosing category's display name, read from the page heading.
    pub category: String,
    /// Relative or absolute image locator, verbatim.
    pub image_path: String,
}

/// The five ordinal star-rating labels.
///
/// Carried on the source markup as a class token next to the `star-rating`
/// marker; persisted as opaque text to match the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingTier {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl RatingTier {
    /// Maps a markup class token to a tier, if it is one of the five labels.
    pub fn from_class_token(token: &str) -> Option<Self> {
        match token {
            "One" => Some(Self::One),
            "Two" => Some(Self::Two),
            "Three" => Some(Self::Three),
            "Four" => Some(Self::Four),
            "Five" => Some(Self::Five),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::One => "One",
            Self::Two => "Two",
            Self::Three => "Three",
            Self::Four => "Four",
            Self::Five => "Five",
        }
    }
}

impl std::fmt::Display for RatingTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category discovered in the site's navigation sidebar.
///
/// Transient: produced once per orchestrator run and discarded. The `name`
/// here is only the navigation label; the authoritative category name for
/// stored items comes from each listing page's own heading.
#[derive(Debug, Clone)]
pub struct CategoryRef {
    pub name: String,
    pub start_url: Url,
}

/// A persisted catalog row as served by the query API.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ItemRecord {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub price: String,
    pub rating: String,
    pub availability: String,
    pub image_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_tier_roundtrip() {
        for tier in &[
            RatingTier::One,
            RatingTier::Two,
            RatingTier::Three,
            RatingTier::Four,
            RatingTier::Five,
        ] {
            let token = tier.as_str();
            assert_eq!(RatingTier::from_class_token(token), Some(*tier));
        }
    }

    #[test]
    fn test_rating_tier_rejects_unknown_token() {
        assert_eq!(RatingTier::from_class_token("Six"), None);
        assert_eq!(RatingTier::from_class_token("star-rating"), None);
        assert_eq!(RatingTier::from_class_token(""), None);
    }

    #[test]
    fn test_rating_tier_is_case_sensitive() {
        assert_eq!(RatingTier::from_class_token("three"), None);
        assert_eq!(RatingTier::from_class_token("THREE"), None);
    }
}
