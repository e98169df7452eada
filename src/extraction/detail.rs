//! Image detail page extraction
//!
//! A detail page (`/images/{id}`) describes one wallpaper: its title, the
//! uploaded image(s), tags, publication date and Open Graph metadata.
//!
//! `id`, `title` and the full-resolution URL are required; a page missing
//! any of them yields an [`ExtractionError::MissingField`]. Everything else
//! degrades to an empty value.

use crate::error::{ExtractionError, Result};
use crate::extraction::document::{attr, element_text, post_id, selector};
use crate::extraction::srcset::full_resolution_url;
use chrono::{DateTime, FixedOffset};
use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

const CONTENT: &str = "article";
const TITLE_PRIMARY: &str = "h1";
const TITLE_SECONDARY: &str = "h2";
const UPLOAD_IMAGE: &str = "img[src*='wp-content/uploads']";
const TAG: &str = "[rel='tag']";
const DATE: &str = "time";
const DATE_FALLBACK: &str = "span.date";
const OPEN_GRAPH: &str = "meta[property^='og:']";

/// One upload image found on a detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageVariant {
    /// Full-resolution URL
    pub url: String,
    /// Largest srcset width, `None` when resolved from `src`
    pub width: Option<u32>,
    /// `alt` attribute of the `<img>`
    pub alt: String,
}

/// Full metadata of one wallpaper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    /// Image id (from the content container's `post-{id}` class)
    pub id: u64,
    /// Descriptive title, usually naming the location
    pub title: String,
    /// Original upload URL, without a `-{w}x{h}` size suffix
    pub full_resolution_url: String,
    /// Tag texts in document order
    pub tags: Vec<String>,
    /// Human readable publication date
    pub date_text: Option<String>,
    /// Machine readable publication date (`datetime` attribute)
    pub date_iso: Option<String>,
    /// `og:*` properties and their content
    pub open_graph: BTreeMap<String, String>,
    /// `alt` text of the main image
    pub alt_text: String,
    /// Every upload image on the page, main image first
    #[serde(default)]
    pub images: Vec<ImageVariant>,
}

impl DetailRecord {
    /// Publication timestamp parsed from `date_iso`
    pub fn published_at(&self) -> Option<DateTime<FixedOffset>> {
        self.date_iso
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
    }

    /// Whether the page offers more than one image (landscape/portrait)
    pub fn is_multi_image(&self) -> bool {
        self.images.len() > 1
    }
}

/// Detail page extraction functionality
pub struct DetailExtractor;

impl DetailExtractor {
    /// Extract the full metadata record from a detail page
    #[instrument(skip(html), fields(html_len = html.len()))]
    pub fn extract(html: &str) -> Result<DetailRecord> {
        let document = Html::parse_document(html);

        let content = document.select(&selector(CONTENT)?).next();
        let id = content
            .and_then(|c| post_id(c.value().classes()))
            .ok_or_else(|| {
                ExtractionError::missing("id", "no article with a post-{id} class token")
            })?;

        let title = Self::title(&document)?;
        let images = Self::images(&document, content)?;
        let main = images.first().cloned().ok_or_else(|| {
            ExtractionError::missing("full_resolution_url", "no wp-content/uploads image")
        })?;

        let tags = Self::tags(&document)?;
        let (date_text, date_iso) = Self::date(&document)?;
        let open_graph = Self::open_graph(&document)?;

        debug!(
            id,
            tags = tags.len(),
            images = images.len(),
            og = open_graph.len(),
            "Detail fields collected"
        );
        if date_text.is_none() {
            debug!(id, "No publication date found");
        }
        info!("Extracted image {}: {}", id, title);

        Ok(DetailRecord {
            id,
            title,
            full_resolution_url: main.url,
            tags,
            date_text,
            date_iso,
            open_graph,
            alt_text: main.alt,
            images,
        })
    }

    fn title(document: &Html) -> Result<String> {
        for css in [TITLE_PRIMARY, TITLE_SECONDARY] {
            if let Some(heading) = document.select(&selector(css)?).next() {
                let text = element_text(heading);
                if text.is_empty() {
                    continue;
                }
                return Ok(text);
            }
        }
        Err(ExtractionError::missing("title", "no non-empty h1 or h2 element").into())
    }

    /// Upload images inside the content container, or the whole document
    /// when the container holds none
    fn images<'a>(
        document: &'a Html,
        content: Option<ElementRef<'a>>,
    ) -> Result<Vec<ImageVariant>> {
        let img_sel = selector(UPLOAD_IMAGE)?;
        let mut elements: Vec<ElementRef<'a>> = content
            .map(|c| c.select(&img_sel).collect())
            .unwrap_or_default();
        if elements.is_empty() {
            elements = document.select(&img_sel).collect();
        }

        Ok(elements
            .into_iter()
            .filter_map(|img| {
                let src = img.value().attr("src")?;
                let (url, width) = full_resolution_url(src, img.value().attr("srcset"));
                Some(ImageVariant {
                    url,
                    width,
                    alt: attr(img, "alt").unwrap_or_default(),
                })
            })
            .collect())
    }

    fn tags(document: &Html) -> Result<Vec<String>> {
        Ok(document
            .select(&selector(TAG)?)
            .map(element_text)
            .collect())
    }

    fn date(document: &Html) -> Result<(Option<String>, Option<String>)> {
        for css in [DATE, DATE_FALLBACK] {
            if let Some(el) = document.select(&selector(css)?).next() {
                let text = Some(element_text(el)).filter(|t| !t.is_empty());
                return Ok((text, attr(el, "datetime")));
            }
        }
        Ok((None, None))
    }

    /// `og:*` meta properties; a repeated property keeps its last value
    fn open_graph(document: &Html) -> Result<BTreeMap<String, String>> {
        let mut og = BTreeMap::new();
        for meta in document.select(&selector(OPEN_GRAPH)?) {
            if let (Some(property), Some(content)) =
                (meta.value().attr("property"), meta.value().attr("content"))
            {
                og.insert(property.to_string(), content.to_string());
            }
        }
        Ok(og)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPLOADS: &str = "https://windows10spotlight.com/wp-content/uploads/2024/05";

    fn page(head: &str, body: &str) -> String {
        format!("<html><head>{head}</head><body>{body}</body></html>")
    }

    #[test]
    fn test_title_falls_back_to_h2() {
        let html = page(
            "",
            &format!(
                r#"<article class="post-9"><h2>Moraine Lake, Canada</h2>
                   <img src="{UPLOADS}/a-1024x576.jpg" alt="Moraine Lake, Canada"></article>"#
            ),
        );
        let record = DetailExtractor::extract(&html).unwrap();
        assert_eq!(record.title, "Moraine Lake, Canada");
        assert_eq!(record.full_resolution_url, format!("{UPLOADS}/a.jpg"));
    }

    #[test]
    fn test_missing_title_is_fatal() {
        let html = page(
            "",
            &format!(r#"<article class="post-9"><img src="{UPLOADS}/a.jpg"></article>"#),
        );
        let err = DetailExtractor::extract(&html).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Extraction(ExtractionError::MissingField { field: "title", .. })
        ));
    }

    #[test]
    fn test_missing_image_is_fatal() {
        let html = page(
            "",
            r#"<article class="post-9"><h1>T</h1><img src="/logo.png"></article>"#,
        );
        let err = DetailExtractor::extract(&html).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Extraction(ExtractionError::MissingField {
                field: "full_resolution_url",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_id_is_fatal() {
        let html = page(
            "",
            &format!(r#"<article class="type-post"><h1>T</h1><img src="{UPLOADS}/a.jpg"></article>"#),
        );
        let err = DetailExtractor::extract(&html).unwrap_err();
        assert!(err.to_string().contains("`id`"));
    }

    #[test]
    fn test_date_fallback_to_span() {
        let html = page(
            "",
            &format!(
                r#"<article class="post-9"><h1>T</h1><img src="{UPLOADS}/a.jpg">
                   <span class="date">May 3, 2024</span></article>"#
            ),
        );
        let record = DetailExtractor::extract(&html).unwrap();
        assert_eq!(record.date_text.as_deref(), Some("May 3, 2024"));
        assert_eq!(record.date_iso, None);
        assert!(record.published_at().is_none());
    }

    #[test]
    fn test_published_at() {
        let html = page(
            "",
            &format!(
                r#"<article class="post-9"><h1>T</h1><img src="{UPLOADS}/a.jpg">
                   <time datetime="2024-05-03T08:15:00+00:00">May 3, 2024</time></article>"#
            ),
        );
        let record = DetailExtractor::extract(&html).unwrap();
        let ts = record.published_at().unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-05-03T08:15:00+00:00");
    }

    #[test]
    fn test_open_graph_last_wins_and_requires_content() {
        let html = page(
            r#"<meta property="og:image" content="first.jpg">
               <meta property="og:image" content="second.jpg">
               <meta property="og:locale">
               <meta property="twitter:card" content="summary">"#,
            &format!(r#"<article class="post-9"><h1>T</h1><img src="{UPLOADS}/a.jpg"></article>"#),
        );
        let record = DetailExtractor::extract(&html).unwrap();
        assert_eq!(record.open_graph.len(), 1);
        assert_eq!(record.open_graph["og:image"], "second.jpg");
    }
}
