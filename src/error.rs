//! Error types for the collector library.

use thiserror::Error;

/// Result type alias for collector operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while collecting or exporting search results.
#[derive(Error, Debug)]
pub enum SearchError {
    /// HTTP request failed or returned a non-success status.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to parse a provider payload or a CSV document.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The request was rejected before any page was fetched.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Generic error.
    #[error("{0}")]
    Other(String),
}
