//! Musica - Playback Session Control
//!
//! Platform-agnostic playback session control for the Musica preview player.
//!
//! This crate provides:
//! - Play queue with a linear cursor
//! - Shuffle projection (Fisher-Yates, current track kept first)
//! - Repeat modes (Off, All, One)
//! - Volume and mute with a remembered pre-mute level
//! - The `PlaybackController` state machine and its event stream
//!
//! # Architecture
//!
//! `musica-playback` never touches audio itself. The controller drives a
//! [`MediaSource`] (an `<audio>` element in the browser, a headless fake in
//! terminals and tests) and consumes the [`MediaEvent`]s it reports. UI
//! updates are queued as [`PlaybackEvent`]s and drained by the front-end.
//!
//! # Example
//!
//! ```rust
//! use musica_core::{SilentNotifier, Track, TrackId};
//! use musica_playback::{HeadlessMediaSource, Navigation, PlaybackController, PlayerConfig};
//! use std::sync::Arc;
//!
//! let tracks: Vec<Track> = (1..=3)
//!     .map(|i| {
//!         Track::new(TrackId::new(i), format!("Song {i}"), "Artist")
//!             .with_preview(format!("https://audio.example.com/{i}.m4a"))
//!     })
//!     .collect();
//!
//! let mut player = PlaybackController::new(
//!     HeadlessMediaSource::new(),
//!     Arc::new(SilentNotifier),
//!     PlayerConfig::default(),
//! );
//!
//! player.play_all(tracks).unwrap();
//! assert_eq!(player.next().unwrap(), Navigation::Moved);
//! assert_eq!(player.next().unwrap(), Navigation::Moved);
//! assert_eq!(player.next().unwrap(), Navigation::Exhausted);
//! assert_eq!(player.queue().cursor(), Some(2));
//! ```

mod controller;
mod error;
mod events;
pub mod queue;
mod shuffle;
mod source;
pub mod types;
mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use controller::{PlaybackController, Session, PLAY_FAILED_NOTICE, UNPLAYABLE_NOTICE};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use queue::{Advance, Direction, Position, Queue};
pub use shuffle::ShuffleProjection;
pub use source::{
    HeadlessMediaSource, LoadGeneration, MediaError, MediaEvent, MediaEventKind, MediaSource,
};
pub use types::{Navigation, PlaybackState, PlayerConfig, RepeatMode};
pub use volume::{Volume, DEFAULT_VOLUME};
