//! Listing page extraction
//!
//! A listing page (the gallery front page or `/page/{n}`) carries the total
//! page count in its pagination block and one `<article>` per image.

use crate::error::Result;
use crate::extraction::document::{attr, element_text, id_from_detail_url, post_id, selector};
use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

const PAGINATION_LINKS: &str = "nav.navigation.pagination a.page-numbers";
const ENTRY: &str = "article";
const DETAIL_LINK: &str = "a[href*='/images/']";
const THUMBNAIL: &str = "img";

/// Summary of one image as shown on a listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    /// Image id (from the `post-{id}` class)
    pub id: u64,
    /// Detail page URL, verbatim from the page
    pub detail_url: String,
    /// Thumbnail image URL
    pub thumbnail_url: String,
    /// Thumbnail `alt` text; normally the 32-character MD5 of the image
    pub thumbnail_hash: Option<String>,
}

impl ListingEntry {
    /// Whether `thumbnail_hash` looks like an MD5 hex digest
    pub fn has_valid_hash(&self) -> bool {
        self.thumbnail_hash.as_deref().is_some_and(is_md5_hex)
    }
}

/// Field of a listing entry that could not be extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryField {
    /// `post-{id}` class token
    Id,
    /// Link to the detail page
    DetailUrl,
    /// Thumbnail `<img src>`
    ThumbnailUrl,
}

/// A listing entry that was skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionWarning {
    /// Index of the article in the page (0-based, counting skipped ones)
    pub position: usize,
    /// Field that was missing
    pub field: EntryField,
    /// Human readable explanation
    pub message: String,
}

/// Everything extracted from one listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingPage {
    /// Total number of listing pages in the gallery (always >= 1)
    pub page_count: u32,
    /// Entries in document order (newest first on the live site)
    pub entries: Vec<ListingEntry>,
    /// Entries that were skipped
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ExtractionWarning>,
}

impl ListingPage {
    /// Ids of all extracted entries, in page order
    pub fn ids(&self) -> Vec<u64> {
        self.entries.iter().map(|e| e.id).collect()
    }
}

/// Listing page extraction functionality
pub struct ListingExtractor;

impl ListingExtractor {
    /// Extract the page count and every image entry from a listing page
    #[instrument(skip(html), fields(html_len = html.len()))]
    pub fn extract(html: &str) -> Result<ListingPage> {
        let document = Html::parse_document(html);
        let page_count = Self::page_count_in(&document)?;

        let entry_sel = selector(ENTRY)?;
        let link_sel = selector(DETAIL_LINK)?;
        let img_sel = selector(THUMBNAIL)?;

        let mut entries = Vec::new();
        let mut warnings = Vec::new();

        for (position, article) in document.select(&entry_sel).enumerate() {
            match Self::extract_entry(article, &link_sel, &img_sel) {
                Ok(entry) => {
                    if entry.thumbnail_hash.is_some() && !entry.has_valid_hash() {
                        debug!(
                            id = entry.id,
                            hash = ?entry.thumbnail_hash,
                            "Thumbnail alt is not a 32-character hex digest"
                        );
                    }
                    entries.push(entry);
                }
                Err((field, message)) => {
                    warn!(position, ?field, "Skipping listing entry: {}", message);
                    warnings.push(ExtractionWarning {
                        position,
                        field,
                        message,
                    });
                }
            }
        }

        info!(
            "Extracted {} entries ({} skipped), page_count={}",
            entries.len(),
            warnings.len(),
            page_count
        );

        Ok(ListingPage {
            page_count,
            entries,
            warnings,
        })
    }

    /// Total page count advertised by the pagination block.
    ///
    /// The largest numeric link text wins; labels such as "Next »" are
    /// ignored and thousands separators (`1,263`) are removed. A page without
    /// pagination has exactly one page.
    #[instrument(skip(html))]
    pub fn page_count(html: &str) -> Result<u32> {
        let document = Html::parse_document(html);
        Self::page_count_in(&document)
    }

    fn page_count_in(document: &Html) -> Result<u32> {
        let link_sel = selector(PAGINATION_LINKS)?;
        let count = document
            .select(&link_sel)
            .filter_map(|link| parse_page_number(&element_text(link)))
            .max()
            .unwrap_or(1);
        Ok(count.max(1))
    }

    fn extract_entry(
        article: ElementRef<'_>,
        link_sel: &scraper::Selector,
        img_sel: &scraper::Selector,
    ) -> std::result::Result<ListingEntry, (EntryField, String)> {
        let id = post_id(article.value().classes())
            .ok_or_else(|| (EntryField::Id, "no post-{id} class token".to_string()))?;

        let detail_url = article
            .select(link_sel)
            .next()
            .and_then(|a| attr(a, "href"))
            .ok_or_else(|| {
                (
                    EntryField::DetailUrl,
                    format!("post-{id} has no link to an /images/ page"),
                )
            })?;
        if id_from_detail_url(&detail_url) != Some(id) {
            return Err((
                EntryField::DetailUrl,
                format!("post-{id} links to {detail_url}, which names a different image"),
            ));
        }

        let img = article.select(img_sel).next();
        let thumbnail_url = img.and_then(|i| attr(i, "src")).ok_or_else(|| {
            (
                EntryField::ThumbnailUrl,
                format!("post-{id} has no thumbnail image"),
            )
        })?;
        let thumbnail_hash = img.and_then(|i| attr(i, "alt"));

        Ok(ListingEntry {
            id,
            detail_url,
            thumbnail_url,
            thumbnail_hash,
        })
    }
}

/// Parse pagination link text such as `"25"` or `"1,263"`
pub fn parse_page_number(text: &str) -> Option<u32> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() || !cleaned.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    cleaned.parse().ok()
}

fn is_md5_hex(s: &str) -> bool {
    s.len() == 32 && s.bytes().all(|b| b.is_ascii_hexdigit())
}
