use std::env;
use std::time::Duration;

/// Default provider endpoint.
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Yahoo Finance base URL (overridable for tests and proxies).
    pub yahoo_base_url: String,
    /// HTTP timeout for provider requests (seconds).
    pub request_timeout_secs: u64,
    /// Time-to-live of fetched series (seconds).
    pub cache_ttl_secs: u64,
    /// Ticker of the tracked stock index.
    pub index_symbol: String,
    /// Ticker of the tracked commodity future.
    pub commodity_symbol: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::with_defaults();

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            yahoo_base_url: env::var("YAHOO_BASE_URL").unwrap_or(defaults.yahoo_base_url),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            cache_ttl_secs: env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_ttl_secs),
            index_symbol: env::var("INDEX_SYMBOL").unwrap_or(defaults.index_symbol),
            commodity_symbol: env::var("COMMODITY_SYMBOL").unwrap_or(defaults.commodity_symbol),
        }
    }

    /// Built-in defaults, independent of the environment.
    pub fn with_defaults() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            yahoo_base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            request_timeout_secs: 30,
            cache_ttl_secs: 60,
            index_symbol: "^GSPC".to_string(),
            commodity_symbol: "GC=F".to_string(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Ticker for a tracked asset.
    pub fn symbol_for(&self, asset: crate::types::Asset) -> &str {
        match asset {
            crate::types::Asset::Index => &self.index_symbol,
            crate::types::Asset::Commodity => &self.commodity_symbol,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Asset;

    #[test]
    fn test_config_default_values() {
        let config = Config::with_defaults();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert_eq!(config.yahoo_base_url, DEFAULT_YAHOO_BASE_URL);
        assert_eq!(config.cache_ttl(), Duration::from_secs(60));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_config_symbols() {
        let config = Config::with_defaults();
        assert_eq!(config.symbol_for(Asset::Index), "^GSPC");
        assert_eq!(config.symbol_for(Asset::Commodity), "GC=F");
    }

    #[test]
    fn test_config_clone() {
        let config = Config {
            host: "localhost".to_string(),
            port: 8080,
            index_symbol: "^NDX".to_string(),
            ..Config::with_defaults()
        };

        let cloned = config.clone();
        assert_eq!(cloned.host, "localhost");
        assert_eq!(cloned.port, 8080);
        assert_eq!(cloned.symbol_for(Asset::Index), "^NDX");
    }
}
