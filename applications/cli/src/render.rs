//! Plain-text rendering of catalog and library items

use musica_core::format::{format_runtime, format_time};
use musica_core::{Album, AlbumDetail, Playlist, Track};

/// One track line: marker, id, title, artist, duration
///
/// `liked` tracks carry a heart; unplayable ones are flagged.
pub fn track_line(track: &Track, liked: bool) -> String {
    let heart = if liked { "♥" } else { " " };
    let duration = track
        .duration_hint()
        .map_or_else(|| "-:--".to_string(), |d| format_time(d.as_secs_f64()));
    let unavailable = if track.is_playable() {
        ""
    } else {
        "  (no preview)"
    };
    format!(
        "{heart} {:>12}  {} - {}  [{duration}]{unavailable}",
        track.id, track.title, track.artist
    )
}

pub fn album_line(album: &Album, liked: bool) -> String {
    let heart = if liked { "♥" } else { " " };
    let count = album
        .track_count
        .map(|n| format!("  ({n} tracks)"))
        .unwrap_or_default();
    format!(
        "{heart} {:>12}  {} - {}{count}",
        album.id, album.title, album.artist
    )
}

/// Header line for an album lookup
pub fn album_header(detail: &AlbumDetail) -> String {
    format!(
        "{} - {}  ·  {} previews  ·  {}",
        detail.album.title,
        detail.album.artist,
        detail.tracks.len(),
        format_runtime(detail.total_duration_ms())
    )
}

pub fn playlist_line(playlist: &Playlist) -> String {
    let songs = if playlist.len() == 1 { "song" } else { "songs" };
    format!(
        "{}  {}  {} {songs}  {}",
        playlist.id,
        playlist.name,
        playlist.len(),
        playlist.color
    )
}

/// Numbered playlist body, indices as accepted by `move` and `remove`
pub fn playlist_body(playlist: &Playlist) -> Vec<String> {
    playlist
        .tracks
        .iter()
        .enumerate()
        .map(|(i, track)| format!("{i:>3}. {} - {}", track.title, track.artist))
        .collect()
}
