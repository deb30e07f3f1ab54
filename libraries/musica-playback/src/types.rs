//! Core types for playback control

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No track loaded
    Idle,

    /// Media asked to load, metadata not yet available
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track (or stopped at the end of the queue)
    Paused,

    /// Track reached its end; resolved immediately into advance-or-stop
    Ended,

    /// Media failed; resolved immediately into `Idle`
    Error,
}

impl PlaybackState {
    /// Whether the session intends to produce sound
    pub fn is_playing(self) -> bool {
        matches!(self, PlaybackState::Loading | PlaybackState::Playing)
    }
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when queue ends
    #[default]
    Off,

    /// Loop entire queue
    All,

    /// Loop current track only
    One,
}

impl RepeatMode {
    /// Next mode in the `off → all → one → off` cycle
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }

    /// Label shown to the user
    pub fn label(self) -> &'static str {
        match self {
            RepeatMode::Off => "Repeat Off",
            RepeatMode::All => "Repeat All",
            RepeatMode::One => "Repeat One",
        }
    }
}

/// Outcome of a `next`/`previous` request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Navigation {
    /// Moved to another queue position and started it
    Moved,

    /// Restarted the current track from zero
    Restarted,

    /// No further track; playback stopped
    Exhausted,
}

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Initial volume (0.0-1.0, default: 0.7)
    pub volume: f32,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Initial shuffle flag (default: false)
    pub shuffle: bool,

    /// Elapsed time after which `previous` restarts the current track
    /// instead of moving back (default: 3000 ms)
    pub restart_threshold_ms: u64,

    /// Fixed seed for shuffle ordering; `None` seeds from entropy
    pub shuffle_seed: Option<u64>,
}

impl PlayerConfig {
    /// `previous` restart threshold
    pub fn restart_threshold(&self) -> Duration {
        Duration::from_millis(self.restart_threshold_ms)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume: 0.7,
            repeat: RepeatMode::Off,
            shuffle: false,
            restart_threshold_ms: 3000,
            shuffle_seed: None,
        }
    }
}
