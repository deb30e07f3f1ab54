//! Playback session controller
//!
//! Owns the session (current track, state, repeat, shuffle, volume) and the
//! queue, drives a [`MediaSource`], and reacts to its events. All methods run
//! to completion on the single control thread.
//!
//! Failures are terminal here: each one raises a user notice through the
//! injected [`Notifier`], leaves the session consistent, and is also returned
//! as a value so callers can inspect it.

use crate::{
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    queue::{Advance, Direction, Position, Queue},
    source::{LoadGeneration, MediaError, MediaEvent, MediaEventKind, MediaSource},
    types::{Navigation, PlaybackState, PlayerConfig, RepeatMode},
    volume::Volume,
};
use musica_core::{NoticeKind, Notifier, Track};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Notice raised for tracks without a preview locator
pub const UNPLAYABLE_NOTICE: &str = "Preview unavailable for this track";

/// Notice raised when the media source fails
pub const PLAY_FAILED_NOTICE: &str = "Unable to play track";

/// Live playback state
///
/// Read-only outside the controller.
#[derive(Debug, Clone)]
pub struct Session {
    /// Track loaded into the media source, if any
    pub current_track: Option<Track>,

    /// State machine position
    pub state: PlaybackState,

    /// Repeat policy
    pub repeat: RepeatMode,

    /// Shuffle flag
    pub shuffle: bool,

    /// Volume and mute
    pub volume: Volume,
}

/// Playback session controller
pub struct PlaybackController<M: MediaSource> {
    media: M,
    notifier: Arc<dyn Notifier>,
    session: Session,
    queue: Queue,
    config: PlayerConfig,
    rng: StdRng,

    // Token of the latest load; events from older loads are dropped
    generation: LoadGeneration,

    // Duration known for the current load
    metadata_loaded: bool,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<M: MediaSource> PlaybackController<M> {
    /// Create a controller driving `media`
    pub fn new(mut media: M, notifier: Arc<dyn Notifier>, config: PlayerConfig) -> Self {
        let mut rng = config
            .shuffle_seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

        let mut queue = Queue::new();
        if config.shuffle {
            queue.enable_shuffle(&mut rng);
        }

        let volume = Volume::new(config.volume);
        media.set_volume(volume.level());

        Self {
            media,
            notifier,
            session: Session {
                current_track: None,
                state: PlaybackState::Idle,
                repeat: config.repeat,
                shuffle: config.shuffle,
                volume,
            },
            queue,
            config,
            rng,
            generation: LoadGeneration::default(),
            metadata_loaded: false,
            pending_events: Vec::new(),
        }
    }

    // ===== Queue =====

    /// Replace the queue without starting playback
    pub fn set_queue(&mut self, tracks: Vec<Track>, start: usize) {
        self.queue.set_tracks(tracks, start, &mut self.rng);
        debug!(length = self.queue.len(), "Queue replaced");
        self.pending_events.push(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    /// Replace the queue with `tracks` and play the first one
    pub fn play_all(&mut self, tracks: Vec<Track>) -> Result<()> {
        let Some(first) = tracks.first().cloned() else {
            return Ok(());
        };
        self.set_queue(tracks, 0);
        self.play(&first, Some(0))
    }

    // ===== Playback Control =====

    /// Play `track`, optionally selecting queue position `index`
    ///
    /// Playing the track that is already loaded resumes it instead of
    /// restarting it.
    pub fn play(&mut self, track: &Track, index: Option<usize>) -> Result<()> {
        if !track.is_playable() {
            return Err(self.reject_unplayable(track));
        }

        if let Some(index) = index {
            if index >= self.queue.len() {
                return Err(PlaybackError::IndexOutOfBounds(index));
            }
            self.queue.select(index, &mut self.rng);
        }

        let already_loaded = self.session.state != PlaybackState::Idle
            && self
                .session
                .current_track
                .as_ref()
                .is_some_and(|current| current.id == track.id);

        if already_loaded {
            if self.session.state.is_playing() {
                return Ok(());
            }
            return self.resume();
        }

        self.load_and_play(track.clone())
    }

    /// Pause if playing, resume if paused, start the queue if nothing is loaded
    pub fn toggle_play(&mut self) -> Result<()> {
        match self.session.state {
            PlaybackState::Idle => {
                if let Some(track) = self.session.current_track.clone() {
                    return self.load_and_play(track);
                }
                let Some(first) = self.queue.get(0).cloned() else {
                    return Err(PlaybackError::NoTrackLoaded);
                };
                self.play(&first, Some(0))
            }
            PlaybackState::Loading | PlaybackState::Playing => {
                self.pause();
                Ok(())
            }
            PlaybackState::Paused | PlaybackState::Ended | PlaybackState::Error => self.resume(),
        }
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if self.session.state.is_playing() {
            self.media.pause();
            self.set_state(PlaybackState::Paused);
        }
    }

    /// Skip to the next track
    ///
    /// Returns [`Navigation::Exhausted`] at the end of the queue under
    /// `repeat = off`; playback then stops without error.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Navigation> {
        match self.queue.advance(Direction::Forward, self.session.repeat) {
            Advance::To(position) => self.go_to(position),
            Advance::Exhausted => {
                self.stop_at_boundary();
                Ok(Navigation::Exhausted)
            }
        }
    }

    /// Go to the previous track
    ///
    /// Past the restart threshold the current track restarts from zero and
    /// the cursor stays put. Otherwise moves back one, wrapping from the
    /// first track to the last.
    pub fn previous(&mut self) -> Result<Navigation> {
        if self.session.state != PlaybackState::Idle
            && self.media.current_time() > self.config.restart_threshold()
        {
            self.media.set_current_time(Duration::ZERO);
            self.emit_progress();
            return Ok(Navigation::Restarted);
        }

        match self.queue.advance(Direction::Backward, self.session.repeat) {
            Advance::To(position) => self.go_to(position),
            Advance::Exhausted => Ok(Navigation::Exhausted),
        }
    }

    // ===== Modes =====

    /// Flip shuffle
    ///
    /// Turning it on keeps the current track first in the new order;
    /// turning it off restores the cursor to that track's queue position.
    pub fn toggle_shuffle(&mut self) {
        self.session.shuffle = !self.session.shuffle;

        if self.session.shuffle {
            self.queue.enable_shuffle(&mut self.rng);
            self.notifier.notify("Shuffle On", NoticeKind::Success);
        } else {
            let current = self.session.current_track.as_ref().map(|t| t.id);
            self.queue.disable_shuffle(current);
            self.notifier.notify("Shuffle Off", NoticeKind::Removed);
        }

        debug!(enabled = self.session.shuffle, "Shuffle toggled");
        self.pending_events.push(PlaybackEvent::ShuffleChanged {
            enabled: self.session.shuffle,
        });
    }

    /// Cycle `off -> all -> one -> off`
    pub fn toggle_repeat(&mut self) {
        let mode = self.session.repeat.cycle();
        self.session.repeat = mode;

        let kind = match mode {
            RepeatMode::Off => NoticeKind::Removed,
            RepeatMode::All | RepeatMode::One => NoticeKind::Success,
        };
        self.notifier.notify(mode.label(), kind);

        debug!(mode = ?mode, "Repeat mode changed");
        self.pending_events.push(PlaybackEvent::RepeatChanged { mode });
    }

    // ===== Seek =====

    /// Jump to `fraction` of the track duration
    ///
    /// No-op while the duration is unknown or `fraction` is not finite.
    pub fn seek(&mut self, fraction: f64) {
        if !fraction.is_finite() {
            return;
        }
        let Some(duration) = self.media.duration() else {
            return;
        };
        if duration.is_zero() {
            return;
        }

        let target = duration.mul_f64(fraction.clamp(0.0, 1.0));
        self.media.set_current_time(target);
        self.emit_progress();
    }

    // ===== Volume =====

    /// Set volume (0.0-1.0, clamped)
    pub fn set_volume(&mut self, level: f32) {
        if !level.is_finite() {
            return;
        }
        self.session.volume.set_level(level);
        self.apply_volume();
    }

    /// Swap between silence and the remembered level
    pub fn toggle_mute(&mut self) {
        self.session.volume.toggle_mute();
        self.apply_volume();
    }

    // ===== Media Events =====

    /// React to an event reported by the media source
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        if event.generation != self.generation {
            trace!(
                event_generation = %event.generation,
                current_generation = %self.generation,
                "Dropping stale media event"
            );
            return;
        }

        match event.kind {
            MediaEventKind::Play => {
                if matches!(
                    self.session.state,
                    PlaybackState::Paused | PlaybackState::Loading
                ) {
                    self.set_state(self.active_state());
                }
            }
            MediaEventKind::Pause => {
                if self.session.state.is_playing() {
                    self.set_state(PlaybackState::Paused);
                }
            }
            MediaEventKind::LoadedMetadata => {
                self.metadata_loaded = true;
                if let Some(duration) = self.media.duration() {
                    self.pending_events.push(PlaybackEvent::DurationChanged {
                        duration_ms: duration.as_millis() as u64,
                    });
                }
                if self.session.state == PlaybackState::Loading {
                    self.set_state(PlaybackState::Playing);
                }
            }
            MediaEventKind::TimeUpdate => self.emit_progress(),
            MediaEventKind::Ended => self.on_ended(),
            MediaEventKind::Error(message) => self.on_error(message),
        }
    }

    // ===== State Queries =====

    /// Current state
    pub fn state(&self) -> PlaybackState {
        self.session.state
    }

    /// Whether the session intends to produce sound
    pub fn is_playing(&self) -> bool {
        self.session.state.is_playing()
    }

    /// Track loaded into the media source
    pub fn current_track(&self) -> Option<&Track> {
        self.session.current_track.as_ref()
    }

    /// The play queue
    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Repeat policy
    pub fn repeat(&self) -> RepeatMode {
        self.session.repeat
    }

    /// Whether shuffle is on
    pub fn is_shuffled(&self) -> bool {
        self.session.shuffle
    }

    /// Effective volume (0.0 while muted)
    pub fn volume(&self) -> f32 {
        self.session.volume.level()
    }

    /// Whether muted
    pub fn is_muted(&self) -> bool {
        self.session.volume.is_muted()
    }

    /// Elapsed time in the current track
    pub fn position(&self) -> Duration {
        self.media.current_time()
    }

    /// Authoritative duration from the media source
    pub fn duration(&self) -> Option<Duration> {
        self.media.duration()
    }

    /// Elapsed fraction in `[0.0, 1.0]`, 0.0 while duration is unknown
    pub fn progress(&self) -> f64 {
        progress_fraction(self.media.current_time(), self.media.duration())
    }

    /// Read-only session snapshot
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Controller configuration
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// The driven media source
    pub fn media(&self) -> &M {
        &self.media
    }

    /// Mutable access to the media source (for drivers that simulate time)
    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Generation of the latest load
    pub fn generation(&self) -> LoadGeneration {
        self.generation
    }

    /// Window-title text: `♫ title • artist` while playing
    pub fn now_playing_title(&self) -> Option<String> {
        if !self.session.state.is_playing() {
            return None;
        }
        self.session
            .current_track
            .as_ref()
            .map(|t| format!("♫ {} • {}", t.title, t.artist))
    }

    // ===== Events =====

    /// Take all pending events
    ///
    /// Call after each intent or media event to update the UI.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Internal =====

    fn reject_unplayable(&self, track: &Track) -> PlaybackError {
        warn!(track_id = %track.id, "Track has no preview");
        self.notifier.notify(UNPLAYABLE_NOTICE, NoticeKind::Error);
        PlaybackError::UnplayableTrack { track_id: track.id }
    }

    /// Play the track at a resolved queue position
    fn go_to(&mut self, position: Position) -> Result<Navigation> {
        let Some(track) = self.queue.track_at(position).cloned() else {
            return Err(PlaybackError::IndexOutOfBounds(position.index));
        };

        self.queue.move_to(position);

        if !track.is_playable() {
            return Err(self.reject_unplayable(&track));
        }

        let same_track = self.session.state != PlaybackState::Idle
            && self
                .session
                .current_track
                .as_ref()
                .is_some_and(|current| current.id == track.id);

        if same_track {
            self.media.set_current_time(Duration::ZERO);
            self.resume()?;
        } else {
            self.load_and_play(track)?;
        }
        Ok(Navigation::Moved)
    }

    fn load_and_play(&mut self, track: Track) -> Result<()> {
        let Some(url) = track.preview_url.clone() else {
            return Err(self.reject_unplayable(&track));
        };

        self.generation = self.generation.next();
        self.metadata_loaded = false;

        let track_id = track.id;
        let previous_track_id = self
            .session
            .current_track
            .replace(track)
            .map(|previous| previous.id);

        info!(track_id = %track_id, generation = %self.generation, "Loading preview");
        self.media.load(&url, self.generation);
        self.set_state(PlaybackState::Loading);
        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id,
            previous_track_id,
        });

        match self.media.play() {
            Ok(()) => Ok(()),
            Err(err) => self.play_rejected(err),
        }
    }

    fn resume(&mut self) -> Result<()> {
        match self.media.play() {
            Ok(()) => {
                self.set_state(self.active_state());
                Ok(())
            }
            Err(err) => self.play_rejected(err),
        }
    }

    fn play_rejected(&mut self, err: MediaError) -> Result<()> {
        if err == MediaError::Aborted {
            debug!("Play request superseded");
            return Ok(());
        }

        warn!(error = %err, "Media source rejected play");
        self.set_state(PlaybackState::Paused);
        self.notifier.notify(PLAY_FAILED_NOTICE, NoticeKind::Error);
        Err(PlaybackError::MediaLoadFailure(err.to_string()))
    }

    /// Stop at the end of the queue; the last track stays loaded
    fn stop_at_boundary(&mut self) {
        if self.session.state == PlaybackState::Idle {
            return;
        }
        if self.session.state.is_playing() {
            self.media.pause();
        }
        debug!("Reached end of queue");
        self.set_state(PlaybackState::Paused);
    }

    fn on_ended(&mut self) {
        self.set_state(PlaybackState::Ended);

        if self.session.repeat == RepeatMode::One {
            self.media.set_current_time(Duration::ZERO);
            if let Err(err) = self.resume() {
                debug!(error = %err, "Repeat-one restart failed");
            }
            return;
        }

        match self.next() {
            Ok(Navigation::Exhausted) => debug!("Queue finished"),
            Ok(_) => {}
            Err(err) => {
                debug!(error = %err, "Auto-advance failed");
                if self.session.state == PlaybackState::Ended {
                    self.set_state(PlaybackState::Paused);
                }
            }
        }
    }

    fn on_error(&mut self, message: String) {
        warn!(
            track_id = ?self.session.current_track.as_ref().map(|t| t.id),
            error = %message,
            "Media error"
        );
        self.set_state(PlaybackState::Error);
        self.metadata_loaded = false;
        self.pending_events.push(PlaybackEvent::Error { message });
        self.notifier.notify(PLAY_FAILED_NOTICE, NoticeKind::Error);
        self.set_state(PlaybackState::Idle);
    }

    /// State to enter once the media is producing (or about to produce) sound
    fn active_state(&self) -> PlaybackState {
        if self.metadata_loaded {
            PlaybackState::Playing
        } else {
            PlaybackState::Loading
        }
    }

    fn apply_volume(&mut self) {
        let level = self.session.volume.level();
        self.media.set_volume(level);
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            level,
            is_muted: self.session.volume.is_muted(),
        });
    }

    fn emit_progress(&mut self) {
        let position = self.media.current_time();
        let duration = self.media.duration();

        self.pending_events.push(PlaybackEvent::ProgressChanged {
            position_ms: position.as_millis() as u64,
            duration_ms: duration.map(|d| d.as_millis() as u64),
            fraction: progress_fraction(position, duration),
        });
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.session.state != state {
            trace!(from = ?self.session.state, to = ?state, "State transition");
            self.session.state = state;
            self.pending_events.push(PlaybackEvent::StateChanged { state });
        }
    }
}

fn progress_fraction(position: Duration, duration: Option<Duration>) -> f64 {
    match duration {
        Some(total) if !total.is_zero() => {
            (position.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::HeadlessMediaSource;
    use musica_core::{SilentNotifier, TrackId};

    // ===== Test Helpers =====

    fn create_track(id: i64) -> Track {
        Track::new(TrackId::new(id), format!("Track {id}"), "Artist")
            .with_preview(format!("https://audio.example.com/{id}.m4a"))
    }

    fn controller() -> PlaybackController<HeadlessMediaSource> {
        let config = PlayerConfig {
            shuffle_seed: Some(1),
            ..PlayerConfig::default()
        };
        PlaybackController::new(HeadlessMediaSource::new(), Arc::new(SilentNotifier), config)
    }

    #[test]
    fn new_controller_is_idle() {
        let ctrl = controller();
        assert_eq!(ctrl.state(), PlaybackState::Idle);
        assert!(ctrl.current_track().is_none());
        assert_eq!(ctrl.media().volume(), 0.7);
    }

    #[test]
    fn play_loads_and_enters_loading() {
        let mut ctrl = controller();
        ctrl.play(&create_track(1), None).unwrap();
        assert_eq!(ctrl.state(), PlaybackState::Loading);
        assert_eq!(ctrl.media().url(), Some("https://audio.example.com/1.m4a"));
        assert_eq!(ctrl.media().generation(), ctrl.generation());
    }

    #[test]
    fn metadata_moves_loading_to_playing() {
        let mut ctrl = controller();
        ctrl.play(&create_track(1), None).unwrap();
        let event = ctrl.media_mut().set_duration(Duration::from_secs(30));
        ctrl.handle_media_event(event);
        assert_eq!(ctrl.state(), PlaybackState::Playing);
        assert_eq!(ctrl.duration(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn toggle_play_on_empty_controller_reports_no_track() {
        let mut ctrl = controller();
        assert_eq!(ctrl.toggle_play(), Err(PlaybackError::NoTrackLoaded));
    }

    #[test]
    fn play_with_out_of_range_index_is_rejected() {
        let mut ctrl = controller();
        ctrl.set_queue(vec![create_track(1)], 0);
        let err = ctrl.play(&create_track(1), Some(4)).unwrap_err();
        assert_eq!(err, PlaybackError::IndexOutOfBounds(4));
        assert!(ctrl.current_track().is_none());
    }

    #[test]
    fn now_playing_title_only_while_playing() {
        let mut ctrl = controller();
        assert_eq!(ctrl.now_playing_title(), None);
        ctrl.play(&create_track(1), None).unwrap();
        assert_eq!(
            ctrl.now_playing_title().as_deref(),
            Some("♫ Track 1 • Artist")
        );
        ctrl.pause();
        assert_eq!(ctrl.now_playing_title(), None);
    }

    #[test]
    fn state_events_are_not_duplicated() {
        let mut ctrl = controller();
        ctrl.play(&create_track(1), None).unwrap();
        ctrl.pause();
        ctrl.pause();
        let states: Vec<_> = ctrl
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                PlaybackEvent::StateChanged { state } => Some(state),
                _ => None,
            })
            .collect();
        assert_eq!(states, vec![PlaybackState::Loading, PlaybackState::Paused]);
    }

    #[test]
    fn progress_fraction_handles_unknown_duration() {
        assert_eq!(progress_fraction(Duration::from_secs(5), None), 0.0);
        assert_eq!(
            progress_fraction(Duration::from_secs(5), Some(Duration::ZERO)),
            0.0
        );
        assert_eq!(
            progress_fraction(Duration::from_secs(15), Some(Duration::from_secs(30))),
            0.5
        );
    }
}
