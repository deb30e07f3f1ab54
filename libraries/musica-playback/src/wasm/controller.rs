//! WASM-compatible PlaybackController wrapper

use super::media::{EventSink, HtmlAudioSource, Listener};
use crate::{
    MediaEvent, PlaybackController, PlaybackError, PlaybackEvent, PlaybackState, PlayerConfig,
};
use js_sys::Function;
use musica_core::{NoticeKind, Notifier, Track};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::{Arc, Mutex};
use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

type Inner = RefCell<PlaybackController<HtmlAudioSource>>;

/// Notifier that buffers notices until the wrapper forwards them to JS
#[derive(Default)]
struct QueuedNotifier {
    queue: Mutex<Vec<(String, NoticeKind)>>,
}

impl QueuedNotifier {
    fn take(&self) -> Vec<(String, NoticeKind)> {
        self.queue
            .lock()
            .map(|mut queue| std::mem::take(&mut *queue))
            .unwrap_or_default()
    }
}

impl Notifier for QueuedNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.push((message.to_string(), kind));
        }
    }
}

#[derive(Default)]
struct Callbacks {
    on_event: RefCell<Option<Function>>,
    on_notice: RefCell<Option<Function>>,
    notices: Arc<QueuedNotifier>,
}

impl Callbacks {
    fn flush(&self, events: Vec<PlaybackEvent>) {
        if let Some(cb) = self.on_event.borrow().as_ref() {
            for event in &events {
                if let Ok(value) = serde_wasm_bindgen::to_value(event) {
                    cb.call1(&JsValue::NULL, &value).ok();
                }
            }
        }

        let notices = self.notices.take();
        if let Some(cb) = self.on_notice.borrow().as_ref() {
            for (message, kind) in notices {
                let kind = serde_wasm_bindgen::to_value(&kind).unwrap_or(JsValue::NULL);
                cb.call2(&JsValue::NULL, &JsValue::from_str(&message), &kind).ok();
            }
        }
    }
}

/// WASM-compatible playback controller
///
/// Wraps the core controller around an `<audio>` element. Register
/// `onEvent` and `onNotice` callbacks to receive state changes and toasts.
#[wasm_bindgen]
pub struct WasmPlaybackController {
    inner: Rc<Inner>,
    callbacks: Rc<Callbacks>,
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl WasmPlaybackController {
    /// Bind a controller to `element`
    ///
    /// `config` is an optional `PlayerConfig` object; missing fields use defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        element: HtmlAudioElement,
        config: JsValue,
    ) -> Result<WasmPlaybackController, JsValue> {
        console_error_panic_hook::set_once();

        let config: PlayerConfig = if config.is_undefined() || config.is_null() {
            PlayerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid player config: {}", e)))?
        };

        let callbacks = Rc::new(Callbacks::default());
        let notifier: Arc<dyn Notifier> = callbacks.notices.clone();
        let media = HtmlAudioSource::new(element);
        let inner = Rc::new(RefCell::new(PlaybackController::new(media, notifier, config)));

        let sink: EventSink = {
            let weak: Weak<Inner> = Rc::downgrade(&inner);
            let callbacks = Rc::clone(&callbacks);
            Rc::new(move |event: MediaEvent| dispatch(&weak, &callbacks, event))
        };
        let listeners = inner.borrow().media().listen(sink)?;

        Ok(Self {
            inner,
            callbacks,
            _listeners: listeners,
        })
    }

    // ===== Playback Control =====

    /// Play a track, optionally selecting its queue index
    pub fn play(&self, track: JsValue, index: Option<usize>) -> Result<(), JsValue> {
        let track: Track = parse(track, "track")?;
        self.run(|ctrl| ctrl.play(&track, index))
    }

    /// Replace the queue and play its first track
    #[wasm_bindgen(js_name = playAll)]
    pub fn play_all(&self, tracks: JsValue) -> Result<(), JsValue> {
        let tracks: Vec<Track> = parse(tracks, "tracks")?;
        self.run(|ctrl| ctrl.play_all(tracks))
    }

    /// Replace the queue without starting playback
    #[wasm_bindgen(js_name = setQueue)]
    pub fn set_queue(&self, tracks: JsValue, start: usize) -> Result<(), JsValue> {
        let tracks: Vec<Track> = parse(tracks, "tracks")?;
        self.run(|ctrl| {
            ctrl.set_queue(tracks, start);
            Ok(())
        })
    }

    /// Pause or resume
    #[wasm_bindgen(js_name = togglePlay)]
    pub fn toggle_play(&self) -> Result<(), JsValue> {
        self.run(PlaybackController::toggle_play)
    }

    /// Skip to next track
    pub fn next(&self) -> Result<(), JsValue> {
        self.run(|ctrl| ctrl.next().map(|_| ()))
    }

    /// Go to previous track (or restart the current one)
    pub fn previous(&self) -> Result<(), JsValue> {
        self.run(|ctrl| ctrl.previous().map(|_| ()))
    }

    // ===== Modes =====

    /// Flip shuffle
    #[wasm_bindgen(js_name = toggleShuffle)]
    pub fn toggle_shuffle(&self) {
        self.run_infallible(PlaybackController::toggle_shuffle);
    }

    /// Cycle repeat mode
    #[wasm_bindgen(js_name = toggleRepeat)]
    pub fn toggle_repeat(&self) {
        self.run_infallible(PlaybackController::toggle_repeat);
    }

    // ===== Seek & Volume =====

    /// Seek to a fraction (0.0 - 1.0) of the track
    pub fn seek(&self, fraction: f64) {
        self.run_infallible(|ctrl| ctrl.seek(fraction));
    }

    /// Set volume (0.0 - 1.0)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, level: f32) {
        self.run_infallible(|ctrl| ctrl.set_volume(level));
    }

    /// Toggle mute
    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&self) {
        self.run_infallible(PlaybackController::toggle_mute);
    }

    // ===== State Queries =====

    /// Current state as a lowercase string
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        let state = self.inner.borrow().state();
        match state {
            PlaybackState::Idle => "idle",
            PlaybackState::Loading => "loading",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
            PlaybackState::Ended => "ended",
            PlaybackState::Error => "error",
        }
        .to_string()
    }

    /// Whether the session intends to produce sound
    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.inner.borrow().is_playing()
    }

    /// Current track as JSON, or null
    #[wasm_bindgen(js_name = getCurrentTrack)]
    pub fn get_current_track(&self) -> JsValue {
        self.inner
            .borrow()
            .current_track()
            .and_then(|t| serde_wasm_bindgen::to_value(t).ok())
            .unwrap_or(JsValue::NULL)
    }

    /// Current repeat mode ("off" | "all" | "one")
    #[wasm_bindgen(js_name = getRepeat)]
    pub fn get_repeat(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.borrow().repeat()).unwrap_or(JsValue::NULL)
    }

    /// Whether shuffle is on
    #[wasm_bindgen(js_name = isShuffled)]
    pub fn is_shuffled(&self) -> bool {
        self.inner.borrow().is_shuffled()
    }

    /// Current volume (0.0 - 1.0)
    #[wasm_bindgen(js_name = getVolume)]
    pub fn get_volume(&self) -> f32 {
        self.inner.borrow().volume()
    }

    /// Whether muted
    #[wasm_bindgen(js_name = isMuted)]
    pub fn is_muted(&self) -> bool {
        self.inner.borrow().is_muted()
    }

    /// Elapsed fraction of the current track
    #[wasm_bindgen(js_name = getProgress)]
    pub fn get_progress(&self) -> f64 {
        self.inner.borrow().progress()
    }

    /// Document title while playing
    #[wasm_bindgen(js_name = nowPlayingTitle)]
    pub fn now_playing_title(&self) -> Option<String> {
        self.inner.borrow().now_playing_title()
    }

    // ===== Event Listeners =====

    /// Register a callback receiving every `PlaybackEvent`
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&self, callback: Function) {
        *self.callbacks.on_event.borrow_mut() = Some(callback);
    }

    /// Register a callback receiving `(message, kind)` notices
    #[wasm_bindgen(js_name = onNotice)]
    pub fn on_notice(&self, callback: Function) {
        *self.callbacks.on_notice.borrow_mut() = Some(callback);
    }

    // ===== Internal =====

    fn run<F>(&self, op: F) -> Result<(), JsValue>
    where
        F: FnOnce(&mut PlaybackController<HtmlAudioSource>) -> crate::Result<()>,
    {
        let (result, events) = {
            let mut ctrl = self.inner.borrow_mut();
            let result = op(&mut *ctrl);
            (result, ctrl.drain_events())
        };
        self.callbacks.flush(events);
        result.map_err(to_js_error)
    }

    fn run_infallible<F>(&self, op: F)
    where
        F: FnOnce(&mut PlaybackController<HtmlAudioSource>),
    {
        let events = {
            let mut ctrl = self.inner.borrow_mut();
            op(&mut *ctrl);
            ctrl.drain_events()
        };
        self.callbacks.flush(events);
    }
}

/// Deliver a media event that arrived from the DOM
fn dispatch(inner: &Weak<Inner>, callbacks: &Callbacks, event: MediaEvent) {
    let Some(inner) = inner.upgrade() else {
        return;
    };
    // DOM events are queued tasks; a re-entrant delivery is dropped
    let Ok(mut ctrl) = inner.try_borrow_mut() else {
        tracing::warn!("Media event arrived during a controller call");
        return;
    };
    ctrl.handle_media_event(event);
    let events = ctrl.drain_events();
    drop(ctrl);
    callbacks.flush(events);
}

fn parse<T: serde::de::DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse {}: {}", what, e)))
}

fn to_js_error(error: PlaybackError) -> JsValue {
    JsValue::from_str(&error.to_string())
}
