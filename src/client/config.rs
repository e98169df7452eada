//! HTTP client configuration

use crate::client::urls::GalleryUrls;
use crate::error::Result;

/// Gallery the scraper targets unless told otherwise
pub const DEFAULT_BASE_URL: &str = "https://windows10spotlight.com";

/// Desktop Chrome user agent; the site turns away obvious bots
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for [`SpotlightClient`](crate::client::SpotlightClient)
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Gallery root URL (default: windows10spotlight.com)
    pub base_url: String,
    /// User agent string
    pub user_agent: String,
    /// Request timeout in milliseconds (default: 30000)
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_ms: 30000,
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Validated URL builder for the configured gallery
    pub fn urls(&self) -> Result<GalleryUrls> {
        GalleryUrls::new(&self.base_url)
    }
}

/// Builder for ClientConfig
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the gallery root URL
    pub fn base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set user agent
    pub fn user_agent<S: Into<String>>(mut self, ua: S) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    /// Set request timeout
    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.config.timeout_ms = ms;
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://windows10spotlight.com");
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
        assert!(config.user_agent.contains("Chrome/120"));
        assert_eq!(config.timeout_ms, 30000);
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::builder()
            .base_url("http://127.0.0.1:8080/")
            .user_agent("TestBot/1.0")
            .timeout_ms(5000)
            .build();

        assert_eq!(config.base_url, "http://127.0.0.1:8080/");
        assert_eq!(config.user_agent, "TestBot/1.0");
        assert_eq!(config.timeout_ms, 5000);
        assert_eq!(config.urls().unwrap().base(), "http://127.0.0.1:8080");
    }
}
