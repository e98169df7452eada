//! Spotlight Web - Windows Spotlight wallpaper gallery scraper
//!
//! This crate extracts image metadata from the windows10spotlight.com
//! gallery: pagination, thumbnails, full-resolution upload URLs, titles,
//! tags, publication dates and Open Graph metadata.
//!
//! # Features
//!
//! - **Listing Extractor**: page count and per-image summaries from a listing page
//! - **Detail Extractor**: full metadata record from an image detail page
//! - **Client**: async HTTP fetcher that builds gallery URLs
//! - **Crawler**: walks every listing page and, optionally, every detail page
//!
//! # Architecture
//!
//! ```text
//! Crawler ──▶ SpotlightClient (reqwest) ──▶ HTML
//!                                            │
//!                          ┌─────────────────┴──────────────┐
//!                          ▼                                ▼
//!                  ListingExtractor                  DetailExtractor
//!                          │                                │
//!                          ▼                                ▼
//!              page count + ListingEntry               DetailRecord
//! ```
//!
//! The extractors are pure functions of one HTML document and can be used
//! without the client:
//!
//! ```rust
//! use spotlight_web::extraction::ListingExtractor;
//!
//! let html = r#"<article class="post-12345">
//!     <a href="https://windows10spotlight.com/images/12345">
//!         <img src="https://windows10spotlight.com/t.jpg" alt="0123456789abcdef0123456789abcdef">
//!     </a>
//! </article>"#;
//!
//! let page = ListingExtractor::extract(html).unwrap();
//! assert_eq!(page.page_count, 1);
//! assert_eq!(page.entries[0].id, 12345);
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use spotlight_web::client::{ClientConfig, SpotlightClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SpotlightClient::new(ClientConfig::default())?;
//!
//!     let pages = client.total_pages().await?;
//!     let listing = client.listing_page(1).await?;
//!     let first = client.image_info(listing.entries[0].id).await?;
//!
//!     println!("{} pages, newest: {}", pages, first.title);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod crawler;
pub mod error;
pub mod extraction;

// Re-exports for convenience
pub use client::{ClientConfig, SpotlightClient};
pub use crawler::{CrawlOptions, CrawlReport, Crawler};
pub use error::{Error, Result};
pub use extraction::{DetailExtractor, DetailRecord, ListingEntry, ListingExtractor, ListingPage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
