//! Error types for Spotlight Web
//!
//! Extraction failures are split the same way the scraper treats them: a
//! missing *required* field is an [`ExtractionError`] and fails the whole
//! document, while missing optional fields never surface here at all.
//! Transport problems live in [`FetchError`].

use thiserror::Error;

/// The main error type for Spotlight Web operations
#[derive(Error, Debug)]
pub enum Error {
    /// Content extraction errors
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// HTTP fetch errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// The detail page describes a different image than the one requested
    #[error("Image id mismatch: requested {requested}, page reports {found}")]
    IdMismatch {
        /// Id used to build the request URL
        requested: u64,
        /// Id found in the page's content container
        found: u64,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Content extraction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// A field the record cannot exist without was not found
    #[error("Missing required field `{field}`: {reason}")]
    MissingField {
        /// Field name as it appears in the record
        field: &'static str,
        /// What was looked for
        reason: String,
    },

    /// Invalid selector
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}

impl ExtractionError {
    /// Shorthand for [`ExtractionError::MissingField`]
    pub fn missing<S: Into<String>>(field: &'static str, reason: S) -> Self {
        ExtractionError::MissingField {
            field,
            reason: reason.into(),
        }
    }
}

/// HTTP fetch errors
#[derive(Error, Debug)]
pub enum FetchError {
    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Request timed out
    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    /// Network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// HTTP error
    #[error("HTTP error {status}: {message}")]
    HttpError {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },
}

/// Result type alias for Spotlight Web operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a generic error from a string
    pub fn generic<S: Into<String>>(msg: S) -> Self {
        Error::Generic(msg.into())
    }
}
