//! Gallery access module
//!
//! This module fetches listing and detail pages over HTTP and feeds them to
//! the extractors. It owns the gallery URL layout and client configuration.

pub mod config;
pub mod fetch;
pub mod urls;

pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use fetch::SpotlightClient;
pub use urls::{id_from_detail_url, GalleryUrls};
