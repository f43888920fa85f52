use serde::Deserialize;

/// Main configuration structure for bookgrab
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
    pub api: ApiConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Absolute URL of the catalog root page (the one carrying the
    /// category sidebar)
    #[serde(rename = "root-url")]
    pub root_url: String,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Safety cap on pages walked per category. The remote site is trusted
    /// to eventually omit its "next" link, but that is not provable from
    /// the client side, so the walker refuses to advance past this bound.
    #[serde(rename = "max-pages-per-category", default = "default_max_pages")]
    pub max_pages_per_category: u32,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// User-agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}

/// Query API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Address the query service listens on, e.g. "127.0.0.1:8080"
    #[serde(rename = "bind-address")]
    pub bind_address: String,

    /// Secret used to sign bearer tokens
    #[serde(rename = "token-secret")]
    pub token_secret: String,
}

fn default_max_pages() -> u32 {
    200
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("bookgrab/{}", env!("CARGO_PKG_VERSION"))
}
