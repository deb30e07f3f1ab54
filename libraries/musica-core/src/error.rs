/// Core error types for Musica
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Musica
#[derive(Error, Debug)]
pub enum CoreError {
    /// Catalog request failed (network, HTTP status, or decoding)
    #[error("Catalog fetch failed: {0}")]
    FetchFailed(String),

    /// Catalog returned no matching entity
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CoreError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}
