//! Catalog search contract
//!
//! The player never talks to the network directly; a `CatalogClient`
//! implementation supplies tracks and albums.

use crate::error::Result;
use crate::types::{Album, AlbumDetail, AlbumId, Track};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Entity kind requested from a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    /// Individual songs
    Song,
    /// Albums
    Album,
}

impl SearchKind {
    /// Catalog `entity` query value
    pub fn as_entity(self) -> &'static str {
        match self {
            SearchKind::Song => "song",
            SearchKind::Album => "album",
        }
    }
}

/// A single search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogItem {
    /// Song result
    Track(Track),
    /// Album result
    Album(Album),
}

impl CatalogItem {
    /// The track, if this hit is one
    pub fn into_track(self) -> Option<Track> {
        match self {
            CatalogItem::Track(track) => Some(track),
            CatalogItem::Album(_) => None,
        }
    }

    /// The album, if this hit is one
    pub fn into_album(self) -> Option<Album> {
        match self {
            CatalogItem::Album(album) => Some(album),
            CatalogItem::Track(_) => None,
        }
    }
}

/// Public catalog search/lookup
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Search the catalog for `term`, returning at most `limit` hits
    async fn search(&self, term: &str, kind: SearchKind, limit: u32) -> Result<Vec<CatalogItem>>;

    /// Look up an album and its tracks
    async fn lookup_album(&self, id: AlbumId) -> Result<AlbumDetail>;

    /// Search songs, keeping only playable ones
    async fn search_tracks(&self, term: &str, limit: u32) -> Result<Vec<Track>> {
        let items = self.search(term, SearchKind::Song, limit).await?;
        Ok(items
            .into_iter()
            .filter_map(CatalogItem::into_track)
            .filter(Track::is_playable)
            .collect())
    }

    /// Search albums
    async fn search_albums(&self, term: &str, limit: u32) -> Result<Vec<Album>> {
        let items = self.search(term, SearchKind::Album, limit).await?;
        Ok(items.into_iter().filter_map(CatalogItem::into_album).collect())
    }
}
