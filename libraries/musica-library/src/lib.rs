//! Musica Library
//!
//! The user's liked tracks, liked albums, and playlists, with best-effort
//! persistence through a [`PersistentStore`].
//!
//! # Example
//!
//! ```rust
//! use musica_core::{SilentNotifier, Track, TrackId};
//! use musica_library::{LibraryConfig, LibraryManager, MemoryStore};
//! use std::sync::Arc;
//!
//! let mut library = LibraryManager::load(
//!     MemoryStore::new(),
//!     Arc::new(SilentNotifier),
//!     &LibraryConfig::default(),
//! );
//!
//! let track = Track::new(TrackId::new(1), "Song", "Artist");
//! assert!(library.toggle_like(&track));
//!
//! let id = library.create_playlist("Favourites", "").unwrap();
//! assert_eq!(library.add_track(&id, &track).unwrap(), 1);
//! assert!(library.add_track(&id, &track).is_err());
//! ```

#![forbid(unsafe_code)]

mod config;
mod error;
mod library;
mod manager;
mod store;

pub use config::{LibraryConfig, DEFAULT_LIBRARY_KEY, DEFAULT_PLAYLISTS_KEY};
pub use error::{LibraryError, Result, StoreError, StoreResult};
pub use library::{Library, LibrarySnapshot};
pub use manager::{LibraryEvent, LibraryManager, MoveDirection};
pub use store::{JsonFileStore, MemoryStore, PersistentStore};
