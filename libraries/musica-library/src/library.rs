//! Liked tracks and albums

use musica_core::{Album, AlbumId, Track, TrackId};
use serde::{Deserialize, Serialize};

/// Persisted shape of the library
///
/// Two lists of `(key, value)` pairs in display order:
/// `{"likedSongs": [[id, track], ...], "likedAlbums": [[id, album], ...]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibrarySnapshot {
    /// Liked tracks keyed by track id
    #[serde(default)]
    pub liked_songs: Vec<(TrackId, Track)>,

    /// Liked albums keyed by album id
    #[serde(default)]
    pub liked_albums: Vec<(AlbumId, Album)>,
}

/// The user's liked tracks and albums
///
/// Membership is keyed by id; iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Library {
    liked_tracks: Vec<Track>,
    liked_albums: Vec<Album>,
}

impl Library {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a persisted snapshot, dropping duplicate keys
    pub fn from_snapshot(snapshot: LibrarySnapshot) -> Self {
        let mut library = Self::new();
        for (id, track) in snapshot.liked_songs {
            if !library.is_liked(id) {
                library.liked_tracks.push(Track { id, ..track });
            }
        }
        for (id, album) in snapshot.liked_albums {
            if !library.is_album_liked(id) {
                library.liked_albums.push(Album { id, ..album });
            }
        }
        library
    }

    /// Persisted shape
    pub fn snapshot(&self) -> LibrarySnapshot {
        LibrarySnapshot {
            liked_songs: self.liked_tracks.iter().map(|t| (t.id, t.clone())).collect(),
            liked_albums: self.liked_albums.iter().map(|a| (a.id, a.clone())).collect(),
        }
    }

    /// Flip membership of `track`, returning whether it is now liked
    pub fn toggle_track(&mut self, track: &Track) -> bool {
        match self.liked_tracks.iter().position(|t| t.id == track.id) {
            Some(pos) => {
                self.liked_tracks.remove(pos);
                false
            }
            None => {
                self.liked_tracks.push(track.clone());
                true
            }
        }
    }

    /// Flip membership of `album`, returning whether it is now liked
    pub fn toggle_album(&mut self, album: &Album) -> bool {
        match self.liked_albums.iter().position(|a| a.id == album.id) {
            Some(pos) => {
                self.liked_albums.remove(pos);
                false
            }
            None => {
                self.liked_albums.push(album.clone());
                true
            }
        }
    }

    /// Whether the track is liked
    pub fn is_liked(&self, id: TrackId) -> bool {
        self.liked_tracks.iter().any(|t| t.id == id)
    }

    /// Whether the album is liked
    pub fn is_album_liked(&self, id: AlbumId) -> bool {
        self.liked_albums.iter().any(|a| a.id == id)
    }

    /// Liked tracks in insertion order
    pub fn liked_tracks(&self) -> &[Track] {
        &self.liked_tracks
    }

    /// Liked albums in insertion order
    pub fn liked_albums(&self) -> &[Album] {
        &self.liked_albums
    }
}
