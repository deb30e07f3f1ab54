/// Track domain type
use crate::types::{AlbumId, TrackId};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::time::Duration;

/// A previewable catalog track
///
/// Immutable once fetched. The same track may live in the queue, the liked
/// songs, and any number of playlists at once; two values are the same track
/// when their ids match, regardless of the other fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Catalog identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album the track belongs to
    #[serde(default)]
    pub album_id: Option<AlbumId>,

    /// Album title
    #[serde(default)]
    pub album_title: Option<String>,

    /// Artwork URL (catalog default is the 100x100 rendition)
    #[serde(default)]
    pub artwork_url: Option<String>,

    /// Preview media URL; `None` means the track cannot be played
    #[serde(default)]
    pub preview_url: Option<String>,

    /// Catalog duration in milliseconds
    ///
    /// Advisory only: the media source's metadata is authoritative.
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

impl Track {
    /// Create a track with minimal metadata
    pub fn new(id: TrackId, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            album_id: None,
            album_title: None,
            artwork_url: None,
            preview_url: None,
            duration_ms: None,
        }
    }

    /// Attach a preview URL
    #[must_use]
    pub fn with_preview(mut self, url: impl Into<String>) -> Self {
        self.preview_url = Some(url.into());
        self
    }

    /// Attach album information
    #[must_use]
    pub fn with_album(mut self, id: AlbumId, title: impl Into<String>) -> Self {
        self.album_id = Some(id);
        self.album_title = Some(title.into());
        self
    }

    /// Attach artwork
    #[must_use]
    pub fn with_artwork(mut self, url: impl Into<String>) -> Self {
        self.artwork_url = Some(url.into());
        self
    }

    /// Whether the track has a media locator
    pub fn is_playable(&self) -> bool {
        self.preview_url.as_deref().is_some_and(|url| !url.is_empty())
    }

    /// Catalog duration hint
    pub fn duration_hint(&self) -> Option<Duration> {
        self.duration_ms.map(Duration::from_millis)
    }

    /// Artwork at a square pixel size (e.g. 400 or 600)
    pub fn artwork_at(&self, px: u32) -> Option<String> {
        self.artwork_url.as_deref().map(|url| artwork_sized(url, px))
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Track {}

impl Hash for Track {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Rewrite a catalog artwork URL to another square size
///
/// Catalog artwork URLs embed their dimensions as `100x100`; other sizes are
/// served from the same path.
pub fn artwork_sized(url: &str, px: u32) -> String {
    url.replace("100x100", &format!("{px}x{px}"))
}
