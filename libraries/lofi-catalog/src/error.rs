//! Error types for the catalog adapter.

use thiserror::Error;

/// Errors that can occur when fetching tracks from the catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Requested zero tracks
    #[error("Track limit must be at least 1, got {0}")]
    InvalidLimit(usize),

    /// Invalid catalog base URL
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// HTTP transport failed (connect, timeout, body read)
    #[error("Catalog request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Catalog answered with a non-success status
    #[error("Catalog returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body is not a list of track records
    #[error("Failed to parse catalog response: {0}")]
    Parse(String),
}

impl CatalogError {
    /// Whether the call failed before a usable response arrived
    ///
    /// `Request` and `Status` are transport failures; everything else is a
    /// malformed request or response.
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, CatalogError::Request(_) | CatalogError::Status { .. })
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
