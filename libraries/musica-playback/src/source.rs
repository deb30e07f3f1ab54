//! Media source contract
//!
//! Abstracts the audio element the controller drives. The browser binding
//! wraps an `HtmlAudioElement`; tests and the terminal front-end use
//! [`HeadlessMediaSource`] or their own fakes.
//!
//! Media sources are asynchronous: `play()` returns before sound starts and
//! the outcome arrives later as a [`MediaEvent`]. Every event carries the
//! [`LoadGeneration`] of the load that produced it so the controller can
//! discard results from a load that has since been superseded.

use std::fmt;
use std::time::Duration;

/// Token identifying one `load` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LoadGeneration(u64);

impl LoadGeneration {
    /// Wrap a raw generation number
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// The generation after this one
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LoadGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Synchronous rejection of `play()`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    /// Superseded by a newer load or pause; not a failure
    Aborted,

    /// Blocked by the host (autoplay policy and the like)
    NotAllowed(String),

    /// Any other failure
    Failed(String),
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::Aborted => write!(f, "playback aborted"),
            MediaError::NotAllowed(msg) => write!(f, "playback not allowed: {msg}"),
            MediaError::Failed(msg) => write!(f, "playback failed: {msg}"),
        }
    }
}

impl std::error::Error for MediaError {}

/// Controllable audio resource
///
/// Not `Send`: media elements live on the single control thread.
pub trait MediaSource {
    /// Point the source at `url`; later events carry `generation`
    fn load(&mut self, url: &str, generation: LoadGeneration);

    /// Start or resume playback
    fn play(&mut self) -> std::result::Result<(), MediaError>;

    /// Pause playback
    fn pause(&mut self);

    /// Elapsed time in the loaded resource
    fn current_time(&self) -> Duration;

    /// Jump to a position
    fn set_current_time(&mut self, position: Duration);

    /// Total duration, `None` until metadata has loaded
    fn duration(&self) -> Option<Duration>;

    /// Output volume (0.0-1.0)
    fn volume(&self) -> f32;

    /// Set output volume (0.0-1.0)
    fn set_volume(&mut self, level: f32);
}

/// What happened on the media source
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEventKind {
    /// Playback started or resumed
    Play,
    /// Playback paused
    Pause,
    /// Reached the end of the resource
    Ended,
    /// Load or decode failed
    Error(String),
    /// Duration became known
    LoadedMetadata,
    /// Playback position advanced
    TimeUpdate,
}

/// Event reported by a media source
#[derive(Debug, Clone, PartialEq)]
pub struct MediaEvent {
    /// Load the event belongs to
    pub generation: LoadGeneration,

    /// What happened
    pub kind: MediaEventKind,
}

impl MediaEvent {
    /// Create an event for `generation`
    pub fn new(generation: LoadGeneration, kind: MediaEventKind) -> Self {
        Self { generation, kind }
    }

    /// Event for an asynchronous `play()` rejection issued under `generation`
    ///
    /// Aborts mean a newer load superseded the request and yield nothing.
    pub fn play_rejected(generation: LoadGeneration, err: MediaError) -> Option<Self> {
        match err {
            MediaError::Aborted => None,
            other => Some(Self::new(generation, MediaEventKind::Error(other.to_string()))),
        }
    }
}

/// Media source without audio output
///
/// Tracks position and volume in memory. The driver decides when time
/// passes and which events fire, which makes it suitable for terminal
/// front-ends and tests.
#[derive(Debug, Clone)]
pub struct HeadlessMediaSource {
    url: Option<String>,
    generation: LoadGeneration,
    position: Duration,
    duration: Option<Duration>,
    volume: f32,
    playing: bool,
}

impl HeadlessMediaSource {
    /// Create an idle source
    pub fn new() -> Self {
        Self {
            url: None,
            generation: LoadGeneration::default(),
            position: Duration::ZERO,
            duration: None,
            volume: 1.0,
            playing: false,
        }
    }

    /// Currently loaded locator
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Generation of the latest load
    pub fn generation(&self) -> LoadGeneration {
        self.generation
    }

    /// Whether `play` was called more recently than `pause`
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Report metadata for the loaded resource
    pub fn set_duration(&mut self, duration: Duration) -> MediaEvent {
        self.duration = Some(duration);
        MediaEvent::new(self.generation, MediaEventKind::LoadedMetadata)
    }

    /// Move the play head forward, returning the events a real element would fire
    pub fn advance(&mut self, elapsed: Duration) -> Vec<MediaEvent> {
        if !self.playing {
            return Vec::new();
        }
        self.position += elapsed;
        let mut events = vec![MediaEvent::new(self.generation, MediaEventKind::TimeUpdate)];
        if let Some(total) = self.duration {
            if self.position >= total {
                self.position = total;
                self.playing = false;
                events.push(MediaEvent::new(self.generation, MediaEventKind::Ended));
            }
        }
        events
    }
}

impl Default for HeadlessMediaSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaSource for HeadlessMediaSource {
    fn load(&mut self, url: &str, generation: LoadGeneration) {
        self.url = Some(url.to_string());
        self.generation = generation;
        self.position = Duration::ZERO;
        self.duration = None;
        self.playing = false;
    }

    fn play(&mut self) -> std::result::Result<(), MediaError> {
        if self.url.is_none() {
            return Err(MediaError::Failed("no source loaded".to_string()));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn current_time(&self) -> Duration {
        self.position
    }

    fn set_current_time(&mut self, position: Duration) {
        self.position = match self.duration {
            Some(total) => position.min(total),
            None => position,
        };
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, level: f32) {
        self.volume = level.clamp(0.0, 1.0);
    }
}
