//! Content extraction module
//!
//! Pure, synchronous extractors over one HTML document each: listing pages
//! and image detail pages, plus the image URL helpers they share.

pub mod detail;
pub mod document;
pub mod listing;
pub mod srcset;

pub use detail::{DetailExtractor, DetailRecord, ImageVariant};
pub use document::{id_from_detail_url, post_id};
pub use listing::{EntryField, ExtractionWarning, ListingEntry, ListingExtractor, ListingPage};
pub use srcset::{
    full_resolution_url, largest_candidate, parse_srcset, strip_dimension_suffix, SrcsetCandidate,
};
