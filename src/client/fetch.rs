//! HTTP fetching of gallery pages
//!
//! The client only moves bytes: it builds the gallery URL, fetches the HTML
//! and hands it to the matching extractor. There is no retry loop; a failed
//! request is returned to the caller as a [`FetchError`].

use crate::client::config::ClientConfig;
use crate::client::urls::GalleryUrls;
use crate::error::{Error, FetchError, Result};
use crate::extraction::{DetailExtractor, DetailRecord, ListingExtractor, ListingPage};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Async client for one Spotlight gallery
#[derive(Debug, Clone)]
pub struct SpotlightClient {
    http: reqwest::Client,
    urls: GalleryUrls,
    timeout_ms: u64,
}

impl SpotlightClient {
    /// Create a client from configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let urls = config.urls()?;
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| FetchError::NetworkError(e.to_string()))?;

        Ok(Self {
            http,
            urls,
            timeout_ms: config.timeout_ms,
        })
    }

    /// URL layout of the configured gallery
    pub fn urls(&self) -> &GalleryUrls {
        &self.urls
    }

    /// Fetch a URL and return the response body.
    ///
    /// Non-2xx responses are reported as [`FetchError::HttpError`].
    #[instrument(skip(self))]
    pub async fn fetch_html(&self, url: &str) -> Result<String> {
        info!("Fetching: {}", url);
        let start = Instant::now();

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} returned HTTP {}", url, status.as_u16());
            return Err(FetchError::HttpError {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unexpected status")
                    .to_string(),
            }
            .into());
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        debug!(
            "Fetched {} bytes from {} in {}ms",
            body.len(),
            url,
            start.elapsed().as_millis()
        );
        Ok(body)
    }

    /// Total number of listing pages, read from page 1
    #[instrument(skip(self))]
    pub async fn total_pages(&self) -> Result<u32> {
        let html = self.fetch_html(&self.urls.listing(1)).await?;
        ListingExtractor::page_count(&html)
    }

    /// Fetch and extract listing page `n`
    #[instrument(skip(self))]
    pub async fn listing_page(&self, n: u32) -> Result<ListingPage> {
        let html = self.fetch_html(&self.urls.listing(n)).await?;
        ListingExtractor::extract(&html)
    }

    /// Fetch and extract the detail page of image `id`.
    ///
    /// Fails with [`Error::IdMismatch`] when the page describes another image,
    /// which happens when the site redirects a removed id.
    #[instrument(skip(self))]
    pub async fn image_info(&self, id: u64) -> Result<DetailRecord> {
        let html = self.fetch_html(&self.urls.detail(id)).await?;
        let record = DetailExtractor::extract(&html)?;
        if record.id != id {
            warn!("Requested image {} but page reports {}", id, record.id);
            return Err(Error::IdMismatch {
                requested: id,
                found: record.id,
            });
        }
        Ok(record)
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout_ms)
        } else {
            FetchError::NetworkError(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_rejects_invalid_base_url() {
        let config = ClientConfig::builder().base_url("not a url").build();
        let err = SpotlightClient::new(config).unwrap_err();
        assert!(matches!(err, Error::Fetch(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn test_client_urls() {
        let client = SpotlightClient::new(ClientConfig::default()).unwrap();
        assert_eq!(
            client.urls().listing(3),
            "https://windows10spotlight.com/page/3"
        );
        assert_eq!(
            client.urls().detail(42),
            "https://windows10spotlight.com/images/42"
        );
    }
}
