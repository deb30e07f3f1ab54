//! Library persistence configuration

use musica_core::types::DEFAULT_PLAYLIST_COLOR;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage key for liked tracks and albums
pub const DEFAULT_LIBRARY_KEY: &str = "musica_library_v4";

/// Storage key for playlists
pub const DEFAULT_PLAYLISTS_KEY: &str = "musica_playlists_v4";

/// Where and under which keys the library is persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Directory holding the JSON documents
    pub storage_dir: PathBuf,

    /// Key (file stem) of the liked-items document
    pub library_key: String,

    /// Key (file stem) of the playlists document
    pub playlists_key: String,

    /// Color for playlists created without one
    pub default_color: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("musica-data"),
            library_key: DEFAULT_LIBRARY_KEY.to_string(),
            playlists_key: DEFAULT_PLAYLISTS_KEY.to_string(),
            default_color: DEFAULT_PLAYLIST_COLOR.to_string(),
        }
    }
}
