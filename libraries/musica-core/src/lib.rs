//! Musica Core
//!
//! Platform-agnostic domain types, collaborator contracts, and error handling
//! shared by every Musica crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Album`, `AlbumDetail`, `Playlist`
//! - **Identifiers**: `TrackId`, `AlbumId`, `PlaylistId` (equality by id, never by reference)
//! - **Contracts**: `Notifier` (transient user notices), `CatalogClient` (search/lookup)
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use musica_core::types::{Track, TrackId};
//!
//! let track = Track::new(TrackId::new(1440857781), "Blinding Lights", "The Weeknd")
//!     .with_preview("https://audio.example.com/preview.m4a");
//!
//! assert!(track.is_playable());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod format;
pub mod notifier;
pub mod types;

// Re-export commonly used types
pub use catalog::{CatalogClient, CatalogItem, SearchKind};
pub use error::{CoreError, Result};
pub use notifier::{NoticeKind, Notifier, SilentNotifier, TracingNotifier};
pub use types::{Album, AlbumDetail, AlbumId, Playlist, PlaylistId, Track, TrackId};
