/// Album domain types
use crate::types::{AlbumId, Track};
use serde::{Deserialize, Serialize};

/// Catalog album (collection)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    /// Catalog identifier
    pub id: AlbumId,

    /// Album title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Artwork URL (100x100 rendition)
    #[serde(default)]
    pub artwork_url: Option<String>,

    /// Number of tracks reported by the catalog
    #[serde(default)]
    pub track_count: Option<u32>,
}

impl Album {
    /// Create an album with minimal metadata
    pub fn new(id: AlbumId, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            artwork_url: None,
            track_count: None,
        }
    }
}

/// An album together with its playable tracks, as returned by a lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumDetail {
    /// Album metadata
    pub album: Album,

    /// Tracks that carry a preview, in catalog order
    pub tracks: Vec<Track>,
}

impl AlbumDetail {
    /// Sum of the catalog durations of all tracks
    pub fn total_duration_ms(&self) -> u64 {
        self.tracks.iter().filter_map(|t| t.duration_ms).sum()
    }
}
