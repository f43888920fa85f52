//! Configuration module for bookgrab
//!
//! Handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use bookgrab::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Catalog root: {}", config.site.root_url);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{ApiConfig, Config, CrawlerConfig, OutputConfig, SiteConfig};

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
