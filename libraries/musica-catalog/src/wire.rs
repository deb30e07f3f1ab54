//! iTunes Search API response shapes

use musica_core::{Album, AlbumId, Track, TrackId};
use serde::Deserialize;

/// Body of every `search` and `lookup` response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub results: Vec<RawItem>,
}

/// One result row; the API mixes tracks and collections in one list
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct RawItem {
    pub wrapper_type: Option<String>,
    pub track_id: Option<i64>,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub collection_id: Option<i64>,
    pub collection_name: Option<String>,
    pub artwork_url100: Option<String>,
    pub preview_url: Option<String>,
    pub track_time_millis: Option<u64>,
    pub track_count: Option<u32>,
}

impl RawItem {
    fn is_collection(&self) -> bool {
        self.wrapper_type.as_deref() == Some("collection")
    }

    /// A track row, or `None` when the row is a collection or lacks an id
    pub fn into_track(self) -> Option<Track> {
        if self.is_collection() {
            return None;
        }
        let id = TrackId::new(self.track_id?);
        Some(Track {
            id,
            title: self.track_name.unwrap_or_default(),
            artist: self.artist_name.unwrap_or_default(),
            album_id: self.collection_id.map(AlbumId::new),
            album_title: self.collection_name,
            artwork_url: self.artwork_url100,
            preview_url: self.preview_url.filter(|url| !url.is_empty()),
            duration_ms: self.track_time_millis,
        })
    }

    /// A collection row, or `None` when the row lacks a collection id
    pub fn into_album(self) -> Option<Album> {
        let id = AlbumId::new(self.collection_id?);
        Some(Album {
            id,
            title: self.collection_name.unwrap_or_default(),
            artist: self.artist_name.unwrap_or_default(),
            artwork_url: self.artwork_url100,
            track_count: self.track_count,
        })
    }
}
