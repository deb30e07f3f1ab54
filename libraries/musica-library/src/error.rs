//! Library and storage errors
use musica_core::{PlaylistId, TrackId};
use thiserror::Error;

/// Result type alias using `LibraryError`
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Result type alias using `StoreError`
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Precondition failures of library and playlist mutations
///
/// The mutation is aborted with nothing changed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LibraryError {
    /// Playlist name is empty after trimming
    #[error("Playlist name must not be empty")]
    InvalidName,

    /// Track is already in the playlist
    #[error("Track {track_id} already in playlist")]
    AlreadyPresent { track_id: TrackId },

    /// No playlist with this id
    #[error("Playlist not found: {0}")]
    NotFound(PlaylistId),

    /// Track index outside the playlist
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),
}

/// Persistence failures
///
/// Never fatal: the in-memory state stays authoritative.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Backend not usable (quota exceeded, storage disabled, ...)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Create an unavailable error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}
