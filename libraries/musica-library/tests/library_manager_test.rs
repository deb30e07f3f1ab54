//! Library manager integration tests
//!
//! Likes, playlist mutations, notices, and persistence behavior against the
//! in-memory and JSON-file stores.

use musica_core::{Album, AlbumId, NoticeKind, Notifier, PlaylistId, Track, TrackId};
use musica_library::{
    JsonFileStore, LibraryConfig, LibraryError, LibraryEvent, LibraryManager, MemoryStore,
    MoveDirection, PersistentStore,
};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

// ===== Test Helpers =====

#[derive(Default)]
struct RecordingNotifier {
    notices: Mutex<Vec<(String, NoticeKind)>>,
}

impl RecordingNotifier {
    fn last(&self) -> Option<(String, NoticeKind)> {
        self.notices.lock().unwrap().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        self.notices.lock().unwrap().push((message.to_string(), kind));
    }
}

fn create_track(id: i64) -> Track {
    Track::new(TrackId::new(id), format!("Song {id}"), "Artist")
        .with_preview(format!("https://audio.example.com/{id}.m4a"))
}

fn manager() -> (LibraryManager<MemoryStore>, Arc<RecordingNotifier>) {
    manager_with(MemoryStore::new())
}

fn manager_with<S: PersistentStore>(store: S) -> (LibraryManager<S>, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let manager = LibraryManager::load(store, notifier.clone(), &LibraryConfig::default());
    (manager, notifier)
}

fn playlist_with(manager: &mut LibraryManager<MemoryStore>, ids: &[i64]) -> PlaylistId {
    let id = manager.create_playlist("Mix", "#ff8800").unwrap();
    let tracks: Vec<Track> = ids.iter().map(|&i| create_track(i)).collect();
    manager.add_all_tracks(&id, &tracks).unwrap();
    id
}

fn track_ids(manager: &LibraryManager<MemoryStore>, id: &PlaylistId) -> Vec<i64> {
    manager
        .playlist(id)
        .map(|p| p.tracks.iter().map(|t| t.id.get()).collect())
        .unwrap_or_default()
}

// ===== Likes =====

#[test]
fn test_toggle_like_is_its_own_inverse() {
    let (mut manager, notifier) = manager();
    let track = create_track(1);

    assert!(manager.toggle_like(&track));
    assert!(manager.is_liked(track.id));
    assert_eq!(
        notifier.last(),
        Some(("Added to Liked Songs".to_string(), NoticeKind::Success))
    );

    assert!(!manager.toggle_like(&track));
    assert!(!manager.is_liked(track.id));
    assert_eq!(
        notifier.last(),
        Some(("Removed from Liked Songs".to_string(), NoticeKind::Removed))
    );

    assert_eq!(manager.store().library_writes(), 2);
}

#[test]
fn test_like_events_name_the_affected_key() {
    let (mut manager, _) = manager();
    manager.toggle_like(&create_track(4));
    manager.toggle_like_album(&Album::new(AlbumId::new(8), "LP", "Artist"));

    assert_eq!(
        manager.drain_events(),
        vec![
            LibraryEvent::TrackLikeChanged {
                track_id: TrackId::new(4),
                liked: true
            },
            LibraryEvent::AlbumLikeChanged {
                album_id: AlbumId::new(8),
                liked: true
            },
        ]
    );
}

#[test]
fn test_toggle_like_album() {
    let (mut manager, notifier) = manager();
    let album = Album::new(AlbumId::new(3), "Record", "Artist");

    assert!(manager.toggle_like_album(&album));
    assert!(manager.is_album_liked(album.id));
    assert_eq!(
        notifier.last(),
        Some(("Added to Albums".to_string(), NoticeKind::Success))
    );

    assert!(!manager.toggle_like_album(&album));
    assert_eq!(
        notifier.last(),
        Some(("Removed from Albums".to_string(), NoticeKind::Removed))
    );
}

// ===== Playlists =====

#[test]
fn test_create_playlist_rejects_blank_name() {
    let (mut manager, notifier) = manager();

    assert_eq!(
        manager.create_playlist("   ", "#000000"),
        Err(LibraryError::InvalidName)
    );
    assert!(manager.playlists().is_empty());
    assert_eq!(manager.store().playlist_writes(), 0);
    assert_eq!(
        notifier.last(),
        Some(("Please enter a name".to_string(), NoticeKind::Error))
    );
}

#[test]
fn test_create_playlist_trims_and_defaults_color() {
    let (mut manager, notifier) = manager();
    let id = manager.create_playlist("  Chill  ", "").unwrap();

    let playlist = manager.playlist(&id).unwrap();
    assert_eq!(playlist.name, "Chill");
    assert_eq!(playlist.color, "#1db954");
    assert!(id.as_str().starts_with("pl_"));
    assert_eq!(manager.store().playlist_writes(), 1);
    assert_eq!(
        notifier.last(),
        Some(("Playlist \"Chill\" created".to_string(), NoticeKind::Success))
    );
}

#[test]
fn test_playlist_ids_are_unique() {
    let (mut manager, _) = manager();
    let a = manager.create_playlist("A", "").unwrap();
    let b = manager.create_playlist("A", "").unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_add_track_reports_count() {
    let (mut manager, notifier) = manager();
    let id = manager.create_playlist("Mix", "").unwrap();

    assert_eq!(manager.add_track(&id, &create_track(1)).unwrap(), 1);
    assert_eq!(manager.add_track(&id, &create_track(2)).unwrap(), 2);
    assert_eq!(
        notifier.last(),
        Some(("Added to Mix".to_string(), NoticeKind::Success))
    );
}

#[test]
fn test_add_duplicate_leaves_playlist_unchanged() {
    let (mut manager, notifier) = manager();
    let id = playlist_with(&mut manager, &[1, 2, 3]);
    let before = serde_json::to_vec(manager.playlist(&id).unwrap()).unwrap();
    let writes = manager.store().playlist_writes();

    let err = manager.add_track(&id, &create_track(2)).unwrap_err();

    assert_eq!(
        err,
        LibraryError::AlreadyPresent {
            track_id: TrackId::new(2)
        }
    );
    let after = serde_json::to_vec(manager.playlist(&id).unwrap()).unwrap();
    assert_eq!(before, after);
    assert_eq!(manager.store().playlist_writes(), writes);
    assert_eq!(
        notifier.last(),
        Some(("Song already in playlist".to_string(), NoticeKind::Error))
    );
}

#[test]
fn test_add_all_tracks_skips_duplicates_in_one_write() {
    let (mut manager, notifier) = manager();
    let id = playlist_with(&mut manager, &[1, 2]);
    let writes = manager.store().playlist_writes();

    let tracks: Vec<Track> = [2, 3, 4].iter().map(|&i| create_track(i)).collect();
    assert_eq!(manager.add_all_tracks(&id, &tracks).unwrap(), 2);

    assert_eq!(track_ids(&manager, &id), vec![1, 2, 3, 4]);
    assert_eq!(manager.store().playlist_writes(), writes + 1);
    assert_eq!(
        notifier.last(),
        Some(("Added 2 songs to Mix".to_string(), NoticeKind::Success))
    );
}

#[test]
fn test_add_all_tracks_when_nothing_new() {
    let (mut manager, notifier) = manager();
    let id = playlist_with(&mut manager, &[1, 2]);
    let writes = manager.store().playlist_writes();

    assert_eq!(manager.add_all_tracks(&id, &[create_track(1)]).unwrap(), 0);
    assert_eq!(manager.store().playlist_writes(), writes);
    assert_eq!(
        notifier.last(),
        Some(("All songs already in playlist".to_string(), NoticeKind::Default))
    );

    assert_eq!(manager.add_all_tracks(&id, &[]).unwrap(), 0);
    assert_eq!(
        notifier.last(),
        Some(("No tracks to add".to_string(), NoticeKind::Error))
    );
}

#[test]
fn test_reorder_swaps_neighbours() {
    let (mut manager, _) = manager();
    let id = playlist_with(&mut manager, &[1, 2, 3]);

    assert!(manager.reorder(&id, 0, MoveDirection::Down).unwrap());
    assert_eq!(track_ids(&manager, &id), vec![2, 1, 3]);

    assert!(manager.reorder(&id, 2, MoveDirection::Up).unwrap());
    assert_eq!(track_ids(&manager, &id), vec![2, 3, 1]);
}

#[test]
fn test_reorder_at_boundaries_is_noop() {
    let (mut manager, _) = manager();
    let id = playlist_with(&mut manager, &[1, 2, 3]);
    let writes = manager.store().playlist_writes();

    assert!(!manager.reorder(&id, 0, MoveDirection::Up).unwrap());
    assert!(!manager.reorder(&id, 2, MoveDirection::Down).unwrap());
    assert_eq!(track_ids(&manager, &id), vec![1, 2, 3]);
    assert_eq!(manager.store().playlist_writes(), writes);

    assert_eq!(
        manager.reorder(&id, 7, MoveDirection::Up),
        Err(LibraryError::IndexOutOfBounds(7))
    );
}

#[test]
fn test_remove_and_clear() {
    let (mut manager, notifier) = manager();
    let id = playlist_with(&mut manager, &[1, 2, 3]);

    let removed = manager.remove(&id, 1).unwrap();
    assert_eq!(removed.id, TrackId::new(2));
    assert_eq!(track_ids(&manager, &id), vec![1, 3]);
    assert_eq!(manager.remove(&id, 5), Err(LibraryError::IndexOutOfBounds(5)));

    manager.clear(&id).unwrap();
    assert!(track_ids(&manager, &id).is_empty());
    assert_eq!(
        notifier.last(),
        Some(("Playlist cleared".to_string(), NoticeKind::Removed))
    );
}

#[test]
fn test_delete_signals_views_to_close() {
    let (mut manager, notifier) = manager();
    let id = playlist_with(&mut manager, &[1]);
    manager.drain_events();

    manager.delete(&id).unwrap();

    assert!(manager.playlist(&id).is_none());
    assert_eq!(
        manager.drain_events(),
        vec![LibraryEvent::PlaylistDeleted { id: id.clone() }]
    );
    assert_eq!(
        notifier.last(),
        Some(("Playlist deleted".to_string(), NoticeKind::Removed))
    );
}

#[test]
fn test_unknown_playlist_is_not_found() {
    let (mut manager, _) = manager();
    let missing = PlaylistId::new("pl_missing");

    assert_eq!(
        manager.add_track(&missing, &create_track(1)),
        Err(LibraryError::NotFound(missing.clone()))
    );
    assert_eq!(manager.clear(&missing), Err(LibraryError::NotFound(missing.clone())));
    assert!(manager.delete(&missing).is_err());
}

// ===== Persistence =====

#[test]
fn test_failed_writes_keep_in_memory_state() {
    let (mut manager, _) = manager();
    manager.store_mut().set_failing(true);

    let track = create_track(1);
    assert!(manager.toggle_like(&track));
    let id = manager.create_playlist("Offline", "").unwrap();
    manager.add_track(&id, &track).unwrap();

    assert!(manager.is_liked(track.id));
    assert_eq!(manager.playlist(&id).unwrap().len(), 1);
}

#[test]
fn test_failed_load_starts_empty() {
    let mut store = MemoryStore::new();
    store.set_failing(true);
    let (manager, _) = manager_with(store);

    assert!(manager.playlists().is_empty());
    assert!(manager.library().liked_tracks().is_empty());
}

#[test]
fn test_state_survives_reload_from_files() {
    let dir = TempDir::new().unwrap();
    let (playlist_id, liked) = {
        let (mut manager, _) = manager_with(JsonFileStore::new(dir.path()));
        for i in [3, 1, 2] {
            manager.toggle_like(&create_track(i));
        }
        manager.toggle_like_album(&Album::new(AlbumId::new(10), "LP", "Artist"));
        let id = manager.create_playlist("Keep", "#123456").unwrap();
        manager
            .add_all_tracks(&id, &[create_track(9), create_track(8)])
            .unwrap();
        (id, vec![3, 1, 2])
    };

    let (manager, _) = manager_with(JsonFileStore::new(dir.path()));
    let ids: Vec<i64> = manager
        .library()
        .liked_tracks()
        .iter()
        .map(|t| t.id.get())
        .collect();
    assert_eq!(ids, liked);
    assert!(manager.is_album_liked(AlbumId::new(10)));

    let playlist = manager.playlist(&playlist_id).unwrap();
    assert_eq!(playlist.name, "Keep");
    assert_eq!(playlist.color, "#123456");
    let track_ids: Vec<i64> = playlist.tracks.iter().map(|t| t.id.get()).collect();
    assert_eq!(track_ids, vec![9, 8]);
    assert_eq!(
        playlist.tracks[0].preview_url.as_deref(),
        Some("https://audio.example.com/9.m4a")
    );
}

#[test]
fn test_playlists_without_timestamp_still_load() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path());
    std::fs::write(
        store.playlists_path(),
        r##"[{"id":"pl_1700000000000","name":"Old","color":"#1db954","tracks":[]}]"##,
    )
    .unwrap();

    let (manager, _) = manager_with(store);
    assert_eq!(manager.playlists().len(), 1);
    assert_eq!(manager.playlists()[0].id, PlaylistId::new("pl_1700000000000"));
}
