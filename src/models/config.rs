//! Configuration module for Token Radar
//!
//! API keys and tunables are read from the environment once, at startup,
//! and handed to provider constructors. Nothing reads the environment later.

use std::time::Duration;
use tracing::{info, warn};

use crate::utils::constants::{
    DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_SCROLL_COUNT, DEFAULT_WEBDRIVER_URL,
};
use crate::utils::scroll::ScrollPolicy;

/// Runtime configuration shared by all providers
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Moralis key for holder lists (empty = not configured)
    pub moralis_api_key: String,
    /// WhoisXML key for WHOIS records (empty = not configured)
    pub whois_api_key: String,
    /// chromedriver endpoint used by the social scraper
    pub webdriver_url: String,
    /// Per-request timeout for provider HTTP calls
    pub http_timeout: Duration,
    /// Scroll loop bounds for the social scraper
    pub scroll: ScrollPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            moralis_api_key: String::new(),
            whois_api_key: String::new(),
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            scroll: ScrollPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Build configuration from environment variables
    /// Keys are NEVER logged, only whether they are present
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let moralis_api_key = read_key("MORALIS_API_KEY");
        let whois_api_key = read_key("WHOIS_API_KEY");

        let webdriver_url =
            std::env::var("WEBDRIVER_URL").unwrap_or(defaults.webdriver_url);

        let http_timeout = std::env::var("RADAR_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.http_timeout);

        let max_scrolls = std::env::var("RADAR_SCROLL_COUNT")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_SCROLL_COUNT);

        Self {
            moralis_api_key,
            whois_api_key,
            webdriver_url,
            http_timeout,
            scroll: ScrollPolicy {
                max_scrolls,
                ..defaults.scroll
            },
        }
    }
}

fn read_key(name: &str) -> String {
    match std::env::var(name) {
        Ok(key) if !key.trim().is_empty() => {
            info!("🔑 {} configured (key hidden for security)", name);
            key.trim().to_string()
        }
        _ => {
            warn!("⚠️ {} not set, the dependent section will be skipped", name);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.moralis_api_key.is_empty());
        assert!(config.whois_api_key.is_empty());
        assert_eq!(config.webdriver_url, "http://localhost:9515");
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert_eq!(config.scroll.max_scrolls, 3);
    }
}
