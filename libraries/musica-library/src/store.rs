//! Persistence backends
//!
//! Stores are plain synchronous key/value documents (the browser's
//! `localStorage` model). Every call is best-effort: callers log failures and
//! keep going.

use crate::config::LibraryConfig;
use crate::error::{StoreError, StoreResult};
use crate::library::LibrarySnapshot;
use musica_core::Playlist;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Storage collaborator for the library and playlists
pub trait PersistentStore {
    /// Load liked items; an absent document yields an empty snapshot
    fn load_library(&self) -> StoreResult<LibrarySnapshot>;

    /// Replace the liked-items document
    fn save_library(&mut self, snapshot: &LibrarySnapshot) -> StoreResult<()>;

    /// Load playlists; an absent document yields an empty list
    fn load_playlists(&self) -> StoreResult<Vec<Playlist>>;

    /// Replace the playlists document
    fn save_playlists(&mut self, playlists: &[Playlist]) -> StoreResult<()>;
}

/// JSON documents in a directory, one file per key
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
    library_key: String,
    playlists_key: String,
}

impl JsonFileStore {
    /// Store documents under `dir` with the default keys
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::from_config(&LibraryConfig {
            storage_dir: dir.into(),
            ..LibraryConfig::default()
        })
    }

    /// Store documents as configured
    pub fn from_config(config: &LibraryConfig) -> Self {
        Self {
            dir: config.storage_dir.clone(),
            library_key: config.library_key.clone(),
            playlists_key: config.playlists_key.clone(),
        }
    }

    /// Storage directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the liked-items document
    pub fn library_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.library_key))
    }

    /// Path of the playlists document
    pub fn playlists_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.playlists_key))
    }

    fn read<T: DeserializeOwned + Default>(path: &Path) -> StoreResult<T> {
        if !path.exists() {
            debug!(path = %path.display(), "No stored document, using defaults");
            return Ok(T::default());
        }
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Written to a sibling temp file, then renamed into place
    fn write<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> StoreResult<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string(value)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        debug!(path = %path.display(), "Stored document");
        Ok(())
    }
}

impl PersistentStore for JsonFileStore {
    fn load_library(&self) -> StoreResult<LibrarySnapshot> {
        Self::read(&self.library_path())
    }

    fn save_library(&mut self, snapshot: &LibrarySnapshot) -> StoreResult<()> {
        self.write(&self.library_path(), snapshot)
    }

    fn load_playlists(&self) -> StoreResult<Vec<Playlist>> {
        Self::read(&self.playlists_path())
    }

    fn save_playlists(&mut self, playlists: &[Playlist]) -> StoreResult<()> {
        self.write(&self.playlists_path(), playlists)
    }
}

/// In-memory store that counts writes and can be told to fail
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    library: LibrarySnapshot,
    playlists: Vec<Playlist>,
    library_writes: usize,
    playlist_writes: usize,
    failing: bool,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `StoreError::Unavailable`
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Number of successful library writes
    pub fn library_writes(&self) -> usize {
        self.library_writes
    }

    /// Number of successful playlist writes
    pub fn playlist_writes(&self) -> usize {
        self.playlist_writes
    }

    fn check(&self) -> StoreResult<()> {
        if self.failing {
            Err(StoreError::unavailable("memory store set to fail"))
        } else {
            Ok(())
        }
    }
}

impl PersistentStore for MemoryStore {
    fn load_library(&self) -> StoreResult<LibrarySnapshot> {
        self.check()?;
        Ok(self.library.clone())
    }

    fn save_library(&mut self, snapshot: &LibrarySnapshot) -> StoreResult<()> {
        self.check()?;
        self.library = snapshot.clone();
        self.library_writes += 1;
        Ok(())
    }

    fn load_playlists(&self) -> StoreResult<Vec<Playlist>> {
        self.check()?;
        Ok(self.playlists.clone())
    }

    fn save_playlists(&mut self, playlists: &[Playlist]) -> StoreResult<()> {
        self.check()?;
        self.playlists = playlists.to_vec();
        self.playlist_writes += 1;
        Ok(())
    }
}
