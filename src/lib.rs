//! Bookgrab: a bookshop catalog ingester
//!
//! This crate crawls a paginated, category-organized book catalog into a
//! SQLite database and serves it back through a small authenticated HTTP API.
//! Ingestion is strictly sequential: one category at a time, one page at a
//! time, with duplicate titles skipped rather than updated.

pub mod api;
pub mod catalog;
pub mod config;
pub mod crawler;
pub mod storage;

use thiserror::Error;

/// Main error type for bookgrab operations
#[derive(Debug, Error)]
pub enum BookgrabError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] storage::PersistenceError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid CSS selector: {0}")]
    Selector(String),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for bookgrab operations
pub type Result<T> = std::result::Result<T, BookgrabError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::{CatalogItem, CategoryRef, RatingTier};
pub use config::Config;
pub use crawler::{CrawlReport, Orchestrator};
pub use storage::{CatalogStore, SqliteCatalog, UpsertOutcome};
