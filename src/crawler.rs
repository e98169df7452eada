//! Whole-gallery crawl
//!
//! Walks listing pages in order with a courtesy delay between fetches, then
//! optionally fetches every discovered detail page with bounded concurrency.
//! A listing page that cannot be fetched aborts the crawl; a detail page
//! that fails is recorded and the crawl moves on.

use crate::client::SpotlightClient;
use crate::error::Result;
use crate::extraction::{DetailRecord, ExtractionWarning, ListingEntry};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Options for a crawl
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// First listing page to fetch (default: 1)
    pub start_page: u32,
    /// Last listing page to fetch (None = up to the page count)
    pub end_page: Option<u32>,
    /// Also fetch every detail page (default: false)
    pub include_details: bool,
    /// Detail pages fetched at once (default: 4)
    pub concurrency: usize,
    /// Pause before each listing fetch after the first, in ms (default: 1000)
    pub request_delay_ms: u64,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            start_page: 1,
            end_page: None,
            include_details: false,
            concurrency: 4,
            request_delay_ms: 1000,
        }
    }
}

/// A skipped listing entry, tagged with its page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWarning {
    /// Listing page number
    pub page: u32,
    /// What was skipped and why
    pub warning: ExtractionWarning,
}

/// A detail page that could not be fetched or extracted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlFailure {
    /// Image id
    pub id: u64,
    /// Error description
    pub error: String,
}

/// Everything a crawl produced
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlReport {
    /// Page count reported by the gallery
    pub page_count: u32,
    /// Listing pages actually fetched
    pub pages_fetched: u32,
    /// Unique listing entries in crawl order
    pub entries: Vec<ListingEntry>,
    /// Entries skipped by the listing extractor
    pub warnings: Vec<PageWarning>,
    /// Detail records, newest (highest id) first
    pub details: Vec<DetailRecord>,
    /// Detail pages that failed
    pub failures: Vec<CrawlFailure>,
}

/// Gallery crawler
pub struct Crawler {
    client: SpotlightClient,
}

impl Crawler {
    /// Create a crawler over a client
    pub fn new(client: SpotlightClient) -> Self {
        Self { client }
    }

    /// Run a crawl
    #[instrument(skip(self))]
    pub async fn run(&self, options: &CrawlOptions) -> Result<CrawlReport> {
        let start_page = options.start_page.max(1);
        let mut report = CrawlReport::default();
        let mut seen = HashSet::new();

        let mut page = start_page;
        let mut last_page = start_page;
        while page <= last_page {
            if page > start_page && options.request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(options.request_delay_ms)).await;
            }

            let listing = self.client.listing_page(page).await?;
            if page == start_page {
                report.page_count = listing.page_count;
                last_page = options
                    .end_page
                    .map_or(listing.page_count, |end| end.min(listing.page_count))
                    .max(start_page);
                info!("Crawling pages {}..={} of {}", start_page, last_page, listing.page_count);
            }

            report.pages_fetched += 1;
            report
                .warnings
                .extend(listing.warnings.into_iter().map(|warning| PageWarning { page, warning }));

            for entry in listing.entries {
                if seen.insert(entry.id) {
                    report.entries.push(entry);
                } else {
                    debug!("Entry {} already seen on an earlier page", entry.id);
                }
            }

            page += 1;
        }

        if options.include_details {
            self.fetch_details(&mut report, options.concurrency.max(1))
                .await;
        }

        info!(
            "Crawl finished: {} pages, {} entries, {} details, {} failures",
            report.pages_fetched,
            report.entries.len(),
            report.details.len(),
            report.failures.len()
        );
        Ok(report)
    }

    async fn fetch_details(&self, report: &mut CrawlReport, concurrency: usize) {
        let client = &self.client;
        let ids: Vec<u64> = report.entries.iter().map(|e| e.id).collect();

        let results: Vec<(u64, Result<DetailRecord>)> = stream::iter(ids)
            .map(|id| async move { (id, client.image_info(id).await) })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        for (id, result) in results {
            match result {
                Ok(record) => report.details.push(record),
                Err(e) => {
                    warn!("Detail page for {} failed: {}", id, e);
                    report.failures.push(CrawlFailure {
                        id,
                        error: e.to_string(),
                    });
                }
            }
        }

        report.details.sort_by(|a, b| b.id.cmp(&a.id));
        report.failures.sort_by(|a, b| b.id.cmp(&a.id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crawl_options_default() {
        let options = CrawlOptions::default();
        assert_eq!(options.start_page, 1);
        assert!(options.end_page.is_none());
        assert!(!options.include_details);
        assert_eq!(options.concurrency, 4);
        assert_eq!(options.request_delay_ms, 1000);
    }

    #[test]
    fn test_crawl_report_serialization() {
        let report = CrawlReport {
            page_count: 3,
            pages_fetched: 1,
            failures: vec![CrawlFailure {
                id: 7,
                error: "HTTP error 404: Not Found".to_string(),
            }],
            ..Default::default()
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["page_count"], 3);
        assert_eq!(json["failures"][0]["id"], 7);
        assert!(json["details"].as_array().unwrap().is_empty());
    }
}
