//! Error types for playback control

use musica_core::TrackId;
use thiserror::Error;

/// Playback errors
///
/// Every variant is recoverable: the controller reports it to the user and
/// leaves the session in a consistent state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// Track has no preview media locator
    #[error("Track {track_id} has no playable preview")]
    UnplayableTrack { track_id: TrackId },

    /// Media source refused or failed to start playback
    #[error("Media load failure: {0}")]
    MediaLoadFailure(String),

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// Nothing to play: no current track and an empty queue
    #[error("No track loaded")]
    NoTrackLoaded,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
