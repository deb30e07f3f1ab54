//! Error types for the catalog client.

use musica_core::{AlbumId, CoreError};
use thiserror::Error;

/// Errors that can occur when talking to the catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Network failure, non-success status, or undecodable body
    #[error("Catalog fetch failed: {0}")]
    FetchFailed(String),

    /// Lookup returned no results
    #[error("Album not found: {0}")]
    AlbumNotFound(AlbumId),

    /// Invalid API base URL
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),
}

impl CatalogError {
    /// Create a fetch failure
    pub fn fetch_failed(msg: impl Into<String>) -> Self {
        Self::FetchFailed(msg.into())
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        Self::FetchFailed(err.to_string())
    }
}

impl From<CatalogError> for CoreError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::FetchFailed(msg) => CoreError::FetchFailed(msg),
            CatalogError::AlbumNotFound(id) => CoreError::not_found("Album", id.to_string()),
            CatalogError::InvalidUrl(msg) => CoreError::InvalidInput(msg),
        }
    }
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
