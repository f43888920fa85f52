use crate::config::types::Config;
use crate::ConfigError;
use url::Url;

/// Validates a parsed configuration.
///
/// Checks that the root URL is an absolute http(s) URL, that numeric bounds
/// are sane, and that required string fields are non-empty.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let root = Url::parse(&config.site.root_url)
        .map_err(|_| ConfigError::InvalidUrl(config.site.root_url.clone()))?;

    if root.scheme() != "http" && root.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(config.site.root_url.clone()));
    }

    if config.crawler.max_pages_per_category == 0 {
        return Err(ConfigError::Validation(
            "crawler.max-pages-per-category must be at least 1".to_string(),
        ));
    }

    if config.crawler.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "crawler.request-timeout-secs must be at least 1".to_string(),
        ));
    }

    if config.output.database_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output.database-path must not be empty".to_string(),
        ));
    }

    if config.api.bind_address.parse::<std::net::SocketAddr>().is_err() {
        return Err(ConfigError::Validation(format!(
            "api.bind-address is not a valid socket address: {}",
            config.api.bind_address
        )));
    }

    if config.api.token_secret.is_empty() {
        return Err(ConfigError::Validation(
            "api.token-secret must not be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{ApiConfig, CrawlerConfig, OutputConfig, SiteConfig};

    fn valid_config() -> Config {
        Config {
            site: SiteConfig {
                root_url: "https://books.toscrape.com/".to_string(),
            },
            crawler: CrawlerConfig {
                max_pages_per_category: 200,
                request_timeout_secs: 30,
                user_agent: "bookgrab/0.1".to_string(),
            },
            output: OutputConfig {
                database_path: "./catalog.db".to_string(),
            },
            api: ApiConfig {
                bind_address: "127.0.0.1:8080".to_string(),
                token_secret: "secret".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_rejects_relative_root_url() {
        let mut config = valid_config();
        config.site.root_url = "books.toscrape.com".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let mut config = valid_config();
        config.site.root_url = "ftp://books.toscrape.com/".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_rejects_zero_page_cap() {
        let mut config = valid_config();
        config.crawler.max_pages_per_category = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_empty_database_path() {
        let mut config = valid_config();
        config.output.database_path = "  ".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_bad_bind_address() {
        let mut config = valid_config();
        config.api.bind_address = "not-an-address".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_empty_token_secret() {
        let mut config = valid_config();
        config.api.token_secret = String::new();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }
}
