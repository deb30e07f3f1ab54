//! Headless queue walk
//!
//! Drives a `PlaybackController` over a `HeadlessMediaSource`, letting each
//! preview run to its end so auto-advance, shuffle, and repeat can be
//! observed without audio output.

use crate::error::Result;
use musica_core::{Notifier, Track, TrackId};
use musica_playback::{
    HeadlessMediaSource, PlaybackController, PlaybackState, PlayerConfig, RepeatMode,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Catalog previews are thirty-second clips
pub const PREVIEW_LENGTH: Duration = Duration::from_secs(30);

/// One started track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkStep {
    /// Position in the linear queue
    pub index: usize,
    pub track_id: TrackId,
    pub title: String,
    pub artist: String,
}

/// Merge command-line overrides into the configured player settings
///
/// `--shuffle` can only turn shuffle on; repeat is replaced only when given.
pub fn walk_config(base: &PlayerConfig, shuffle: bool, repeat: Option<RepeatMode>) -> PlayerConfig {
    let mut config = base.clone();
    config.shuffle |= shuffle;
    if let Some(repeat) = repeat {
        config.repeat = repeat;
    }
    config
}

/// Play `tracks` from the first one until the queue stops or `max_steps` tracks have started
pub fn walk(
    tracks: Vec<Track>,
    config: PlayerConfig,
    notifier: Arc<dyn Notifier>,
    max_steps: usize,
) -> Result<(Vec<WalkStep>, PlaybackState)> {
    let mut player = PlaybackController::new(HeadlessMediaSource::new(), notifier, config);
    player.play_all(tracks)?;

    let mut steps = Vec::new();
    while steps.len() < max_steps && player.is_playing() {
        let Some(track) = player.current_track().cloned() else {
            break;
        };
        steps.push(WalkStep {
            index: player.queue().cursor().unwrap_or_default(),
            track_id: track.id,
            title: track.title.clone(),
            artist: track.artist.clone(),
        });

        let length = track
            .duration_hint()
            .map_or(PREVIEW_LENGTH, |d| d.min(PREVIEW_LENGTH));
        let metadata = player.media_mut().set_duration(length);
        player.handle_media_event(metadata);
        for event in player.media_mut().advance(length) {
            player.handle_media_event(event);
        }

        for event in player.drain_events() {
            debug!(?event, "Playback event");
        }
    }

    Ok((steps, player.state()))
}
