//! Playback Events
//!
//! Notifications for the presentation layer. The controller queues them as
//! state changes happen; the front-end drains the queue after each intent or
//! media event and re-renders only what changed.
//!
//! `ProgressChanged` fires on every media time update. Throttling it is the
//! presentation layer's concern.

use crate::types::{PlaybackState, RepeatMode};
use musica_core::TrackId;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Session state changed
    StateChanged {
        /// The new state
        state: PlaybackState,
    },

    /// A different track became current
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Play head moved
    ProgressChanged {
        /// Elapsed time
        position_ms: u64,
        /// Total duration, when known
        duration_ms: Option<u64>,
        /// `position / duration` in `[0.0, 1.0]`, 0.0 while duration is unknown
        fraction: f64,
    },

    /// Total duration became known
    DurationChanged {
        /// Duration reported by the media source
        duration_ms: u64,
    },

    /// Volume or mute changed
    VolumeChanged {
        /// New level (0.0-1.0)
        level: f32,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Shuffle toggled
    ShuffleChanged {
        /// Whether shuffle is now on
        enabled: bool,
    },

    /// Repeat mode cycled
    RepeatChanged {
        /// The new mode
        mode: RepeatMode,
    },

    /// Queue replaced
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Recoverable playback failure
    Error {
        /// Error message
        message: String,
    },
}
