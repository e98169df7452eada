//! Gallery URL layout
//!
//! Page 1 of the listing is the gallery root, later pages live under
//! `/page/{n}`, and every image has a detail page at `/images/{id}`.

use crate::error::{FetchError, Result};
use url::Url;

pub use crate::extraction::document::id_from_detail_url;

/// URL builder for one gallery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryUrls {
    base: String,
}

impl GalleryUrls {
    /// Validate `base` (http/https only) and drop any trailing slashes
    pub fn new(base: &str) -> Result<Self> {
        let parsed =
            Url::parse(base).map_err(|e| FetchError::InvalidUrl(format!("{base}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(format!(
                "URL must start with http:// or https://: {base}"
            ))
            .into());
        }
        if parsed.host_str().is_none() {
            return Err(FetchError::InvalidUrl(format!("URL has no host: {base}")).into());
        }
        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
        })
    }

    /// Gallery root without a trailing slash
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Listing page `n`; page 0 is treated as page 1
    pub fn listing(&self, n: u32) -> String {
        if n <= 1 {
            self.base.clone()
        } else {
            format!("{}/page/{}", self.base, n)
        }
    }

    /// Detail page of image `id`
    pub fn detail(&self, id: u64) -> String {
        format!("{}/images/{}", self.base, id)
    }
}
