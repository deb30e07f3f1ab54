/// Playlist domain type
use crate::types::{PlaylistId, Track, TrackId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cover color used when the user does not pick one
pub const DEFAULT_PLAYLIST_COLOR: &str = "#1db954";

/// User-curated, ordered track collection
///
/// Holds each track at most once (by id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Display name
    pub name: String,

    /// Cover color tag (CSS color)
    pub color: String,

    /// Tracks in user order
    #[serde(default)]
    pub tracks: Vec<Track>,

    /// Creation timestamp
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Playlist {
    /// Create an empty playlist with a fresh id
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: PlaylistId::generate(),
            name: name.into(),
            color: color.into(),
            tracks: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Whether a track with this id is already present
    pub fn contains(&self, id: TrackId) -> bool {
        self.tracks.iter().any(|t| t.id == id)
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the playlist has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
