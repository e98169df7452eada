//! Full-resolution image URL recovery
//!
//! WordPress serves each upload at several sizes. The original file is the
//! undecorated `{hash}.jpg`; resized copies carry a `-{width}x{height}` suffix
//! before the extension and are advertised through `srcset`. Two strategies
//! recover the original:
//!
//! - **srcset parse**: pick the candidate with the largest `w` descriptor.
//! - **suffix strip**: drop the dimension suffix from `src`.
//!
//! [`full_resolution_url`] prefers the first and falls back to the second.
//! The srcset winner is passed through the suffix strip as well, since large
//! uploads are often missing from their own srcset.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// One `"{url} {width}w"` entry of a `srcset` attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrcsetCandidate {
    /// Candidate image URL
    pub url: String,
    /// Width descriptor in pixels
    pub width: u32,
}

fn dimension_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"-\d+x\d+(\.[A-Za-z0-9]+)$").expect("dimension suffix pattern is valid")
    })
}

/// Parse a `srcset` attribute into width candidates.
///
/// Entries without a `w` descriptor (e.g. `2x` density descriptors) or with an
/// unparsable width are skipped.
pub fn parse_srcset(srcset: &str) -> Vec<SrcsetCandidate> {
    srcset
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split_whitespace();
            let url = parts.next()?;
            let descriptor = parts.next()?;
            if parts.next().is_some() {
                return None;
            }
            let width = descriptor.strip_suffix('w')?.parse::<u32>().ok()?;
            Some(SrcsetCandidate {
                url: url.to_string(),
                width,
            })
        })
        .collect()
}

/// The widest candidate; the first one wins a tie
pub fn largest_candidate(candidates: &[SrcsetCandidate]) -> Option<&SrcsetCandidate> {
    candidates
        .iter()
        .fold(None, |best: Option<&SrcsetCandidate>, c| match best {
            Some(b) if b.width >= c.width => Some(b),
            _ => Some(c),
        })
}

/// Remove a trailing `-{width}x{height}` right before the file extension.
///
/// URLs without such a suffix are returned unchanged.
pub fn strip_dimension_suffix(url: &str) -> String {
    dimension_suffix().replace(url, "$1").into_owned()
}

/// Resolve the full-resolution URL of an upload image.
///
/// Returns the URL together with the srcset width it came from, or `None` for
/// the width when the suffix-strip fallback was used.
pub fn full_resolution_url(src: &str, srcset: Option<&str>) -> (String, Option<u32>) {
    let candidates = srcset.map(parse_srcset).unwrap_or_default();
    match largest_candidate(&candidates) {
        Some(best) => (strip_dimension_suffix(&best.url), Some(best.width)),
        None => (strip_dimension_suffix(src), None),
    }
}
