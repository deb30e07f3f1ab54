//! Domain types for Musica

mod album;
mod ids;
mod playlist;
mod track;

pub use album::{Album, AlbumDetail};
pub use ids::{AlbumId, PlaylistId, TrackId};
pub use playlist::{Playlist, DEFAULT_PLAYLIST_COLOR};
pub use track::{artwork_sized, Track};
