//! Small helpers over `scraper` shared by both extractors

use crate::error::ExtractionError;
use scraper::{ElementRef, Selector};
use url::Url;

/// Parse a CSS selector, mapping failures into [`ExtractionError`]
pub(crate) fn selector(css: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(css).map_err(|e| ExtractionError::InvalidSelector(format!("{css}: {e:?}")))
}

/// Find the image id in a class token list.
///
/// WordPress marks each post container with `post-{id}`; other `post-*`
/// tokens (`post-template-default`, `post-image`) are skipped.
pub fn post_id<'a, I>(classes: I) -> Option<u64>
where
    I: IntoIterator<Item = &'a str>,
{
    classes.into_iter().find_map(|class| {
        let digits = class.strip_prefix("post-")?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse::<u64>().ok().filter(|id| *id > 0)
    })
}

/// Image id named by a detail page link (`.../images/{id}`, optionally
/// followed by a slash, query or fragment).
///
/// Relative links such as `/images/12345` are accepted.
pub fn id_from_detail_url(url: &str) -> Option<u64> {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse("http://localhost/").ok()?.join(url).ok()?
        }
        Err(_) => return None,
    };
    let segment = parsed
        .path_segments()?
        .filter(|s| !s.is_empty())
        .skip_while(|s| *s != "images")
        .nth(1)?;
    segment.parse().ok()
}

/// Text content of an element with whitespace runs collapsed
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Value of an attribute on an element, if present
pub(crate) fn attr(element: ElementRef<'_>, name: &str) -> Option<String> {
    element.value().attr(name).map(String::from)
}
