//! Library manager
//!
//! Owns the in-memory library and playlists, persists after every mutation,
//! and reports outcomes through the notifier. In-memory state is the source
//! of truth: a failed write is logged and the mutation stands.

use crate::config::LibraryConfig;
use crate::error::{LibraryError, Result};
use crate::library::Library;
use crate::store::PersistentStore;
use musica_core::{Album, AlbumId, NoticeKind, Notifier, Playlist, PlaylistId, Track, TrackId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Direction for `reorder`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    /// Towards index 0
    Up,
    /// Towards the end
    Down,
}

/// Change notifications for the presentation layer
///
/// Like changes name the affected key only, so a front-end can update a
/// single heart icon instead of re-rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LibraryEvent {
    /// A track was liked or unliked
    TrackLikeChanged {
        /// The affected track
        track_id: TrackId,
        /// New membership
        liked: bool,
    },

    /// An album was liked or unliked
    AlbumLikeChanged {
        /// The affected album
        album_id: AlbumId,
        /// New membership
        liked: bool,
    },

    /// A playlist was created or its tracks changed
    PlaylistChanged {
        /// The affected playlist
        id: PlaylistId,
    },

    /// A playlist was deleted; views showing it should close
    PlaylistDeleted {
        /// The deleted playlist
        id: PlaylistId,
    },
}

/// Liked items and playlists backed by a `PersistentStore`
pub struct LibraryManager<S: PersistentStore> {
    store: S,
    notifier: Arc<dyn Notifier>,
    library: Library,
    playlists: Vec<Playlist>,
    default_color: String,
    pending_events: Vec<LibraryEvent>,
}

impl<S: PersistentStore> LibraryManager<S> {
    /// Load state from `store`
    ///
    /// Unreadable documents are logged and replaced by empty defaults.
    pub fn load(store: S, notifier: Arc<dyn Notifier>, config: &LibraryConfig) -> Self {
        let library = match store.load_library() {
            Ok(snapshot) => Library::from_snapshot(snapshot),
            Err(err) => {
                warn!(error = %err, "Failed to load library, starting empty");
                Library::new()
            }
        };

        let playlists = store.load_playlists().unwrap_or_else(|err| {
            warn!(error = %err, "Failed to load playlists, starting empty");
            Vec::new()
        });

        info!(
            liked_tracks = library.liked_tracks().len(),
            liked_albums = library.liked_albums().len(),
            playlists = playlists.len(),
            "Library loaded"
        );

        Self {
            store,
            notifier,
            library,
            playlists,
            default_color: config.default_color.clone(),
            pending_events: Vec::new(),
        }
    }

    // ===== Likes =====

    /// Flip the liked state of `track`, returning the new state
    pub fn toggle_like(&mut self, track: &Track) -> bool {
        let liked = self.library.toggle_track(track);
        if liked {
            self.notifier.notify("Added to Liked Songs", NoticeKind::Success);
        } else {
            self.notifier.notify("Removed from Liked Songs", NoticeKind::Removed);
        }
        self.persist_library();
        self.pending_events.push(LibraryEvent::TrackLikeChanged {
            track_id: track.id,
            liked,
        });
        liked
    }

    /// Flip the liked state of `album`, returning the new state
    pub fn toggle_like_album(&mut self, album: &Album) -> bool {
        let liked = self.library.toggle_album(album);
        if liked {
            self.notifier.notify("Added to Albums", NoticeKind::Success);
        } else {
            self.notifier.notify("Removed from Albums", NoticeKind::Removed);
        }
        self.persist_library();
        self.pending_events.push(LibraryEvent::AlbumLikeChanged {
            album_id: album.id,
            liked,
        });
        liked
    }

    /// Whether the track is liked
    pub fn is_liked(&self, id: TrackId) -> bool {
        self.library.is_liked(id)
    }

    /// Whether the album is liked
    pub fn is_album_liked(&self, id: AlbumId) -> bool {
        self.library.is_album_liked(id)
    }

    /// Liked tracks and albums
    pub fn library(&self) -> &Library {
        &self.library
    }

    // ===== Playlists =====

    /// All playlists in creation order
    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    /// Look up a playlist
    pub fn playlist(&self, id: &PlaylistId) -> Option<&Playlist> {
        self.playlists.iter().find(|p| &p.id == id)
    }

    /// Create an empty playlist
    ///
    /// `name` is trimmed; an empty `color` uses the configured default.
    pub fn create_playlist(&mut self, name: &str, color: &str) -> Result<PlaylistId> {
        let name = name.trim();
        if name.is_empty() {
            self.notifier.notify("Please enter a name", NoticeKind::Error);
            return Err(LibraryError::InvalidName);
        }

        let color = match color.trim() {
            "" => self.default_color.clone(),
            c => c.to_string(),
        };
        let playlist = Playlist::new(name, color);
        let id = playlist.id.clone();
        debug!(playlist_id = %id, name, "Creating playlist");

        self.playlists.push(playlist);
        self.persist_playlists();
        self.notifier
            .notify(&format!("Playlist \"{name}\" created"), NoticeKind::Success);
        self.pending_events
            .push(LibraryEvent::PlaylistChanged { id: id.clone() });
        Ok(id)
    }

    /// Append `track` unless already present, returning the new track count
    pub fn add_track(&mut self, id: &PlaylistId, track: &Track) -> Result<usize> {
        let index = self.find(id)?;
        let playlist = &mut self.playlists[index];

        if playlist.contains(track.id) {
            self.notifier.notify("Song already in playlist", NoticeKind::Error);
            return Err(LibraryError::AlreadyPresent { track_id: track.id });
        }

        playlist.tracks.push(track.clone());
        let count = playlist.len();
        let message = format!("Added to {}", playlist.name);

        self.persist_playlists();
        self.notifier.notify(&message, NoticeKind::Success);
        self.pending_events
            .push(LibraryEvent::PlaylistChanged { id: id.clone() });
        Ok(count)
    }

    /// Append every absent track with a single write, returning how many were added
    pub fn add_all_tracks(&mut self, id: &PlaylistId, tracks: &[Track]) -> Result<usize> {
        let index = self.find(id)?;

        if tracks.is_empty() {
            self.notifier.notify("No tracks to add", NoticeKind::Error);
            return Ok(0);
        }

        let playlist = &mut self.playlists[index];
        let mut added = 0;
        for track in tracks {
            if !playlist.contains(track.id) {
                playlist.tracks.push(track.clone());
                added += 1;
            }
        }

        if added == 0 {
            self.notifier
                .notify("All songs already in playlist", NoticeKind::Default);
            return Ok(0);
        }

        let message = format!("Added {added} songs to {}", playlist.name);
        self.persist_playlists();
        self.notifier.notify(&message, NoticeKind::Success);
        self.pending_events
            .push(LibraryEvent::PlaylistChanged { id: id.clone() });
        Ok(added)
    }

    /// Swap the track at `index` with its neighbour
    ///
    /// Returns `Ok(false)` without writing when the move would leave the list.
    pub fn reorder(
        &mut self,
        id: &PlaylistId,
        index: usize,
        direction: MoveDirection,
    ) -> Result<bool> {
        let position = self.find(id)?;
        let tracks = &mut self.playlists[position].tracks;

        if index >= tracks.len() {
            return Err(LibraryError::IndexOutOfBounds(index));
        }
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => Some(index + 1).filter(|&t| t < tracks.len()),
        };
        let Some(target) = target else {
            return Ok(false);
        };

        tracks.swap(index, target);
        self.persist_playlists();
        self.pending_events
            .push(LibraryEvent::PlaylistChanged { id: id.clone() });
        Ok(true)
    }

    /// Remove the track at `index`
    pub fn remove(&mut self, id: &PlaylistId, index: usize) -> Result<Track> {
        let position = self.find(id)?;
        let tracks = &mut self.playlists[position].tracks;

        if index >= tracks.len() {
            return Err(LibraryError::IndexOutOfBounds(index));
        }
        let removed = tracks.remove(index);

        self.persist_playlists();
        self.pending_events
            .push(LibraryEvent::PlaylistChanged { id: id.clone() });
        Ok(removed)
    }

    /// Remove every track
    pub fn clear(&mut self, id: &PlaylistId) -> Result<()> {
        let position = self.find(id)?;
        self.playlists[position].tracks.clear();

        self.persist_playlists();
        self.notifier.notify("Playlist cleared", NoticeKind::Removed);
        self.pending_events
            .push(LibraryEvent::PlaylistChanged { id: id.clone() });
        Ok(())
    }

    /// Delete the playlist
    pub fn delete(&mut self, id: &PlaylistId) -> Result<Playlist> {
        let position = self.find(id)?;
        let removed = self.playlists.remove(position);

        self.persist_playlists();
        self.notifier.notify("Playlist deleted", NoticeKind::Removed);
        self.pending_events
            .push(LibraryEvent::PlaylistDeleted { id: id.clone() });
        Ok(removed)
    }

    // ===== Events =====

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<LibraryEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// The backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the backing store
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    // ===== Internal =====

    fn find(&self, id: &PlaylistId) -> Result<usize> {
        match self.playlists.iter().position(|p| &p.id == id) {
            Some(index) => Ok(index),
            None => {
                debug!(playlist_id = %id, "Playlist not found");
                self.notifier.notify("Playlist not found", NoticeKind::Error);
                Err(LibraryError::NotFound(id.clone()))
            }
        }
    }

    fn persist_library(&mut self) {
        let snapshot = self.library.snapshot();
        if let Err(err) = self.store.save_library(&snapshot) {
            warn!(error = %err, "Failed to persist library");
        }
    }

    fn persist_playlists(&mut self) {
        if let Err(err) = self.store.save_playlists(&self.playlists) {
            warn!(error = %err, "Failed to persist playlists");
        }
    }
}
