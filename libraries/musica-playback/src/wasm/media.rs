//! `MediaSource` backed by an `HtmlAudioElement`

use crate::source::{LoadGeneration, MediaError, MediaEvent, MediaEventKind, MediaSource};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlAudioElement;

/// Receives events from the element
pub type EventSink = Rc<dyn Fn(MediaEvent)>;

/// DOM listener kept alive for the lifetime of the binding
pub type Listener = Closure<dyn FnMut(web_sys::Event)>;

const ELEMENT_EVENTS: [&str; 6] = [
    "play",
    "pause",
    "ended",
    "error",
    "loadedmetadata",
    "timeupdate",
];

/// Audio element adapter
pub struct HtmlAudioSource {
    element: HtmlAudioElement,
    generation: Rc<Cell<LoadGeneration>>,
    sink: Rc<RefCell<Option<EventSink>>>,

    // Shared by every play() promise; bound to the issuing generation per call
    on_rejected: Closure<dyn FnMut(JsValue, JsValue)>,
}

impl HtmlAudioSource {
    /// Wrap an existing audio element
    pub fn new(element: HtmlAudioElement) -> Self {
        let generation = Rc::new(Cell::new(LoadGeneration::default()));
        let sink: Rc<RefCell<Option<EventSink>>> = Rc::new(RefCell::new(None));

        let on_rejected = {
            let sink = Rc::clone(&sink);
            Closure::wrap(Box::new(move |issued: JsValue, err: JsValue| {
                let generation = LoadGeneration::new(issued.as_f64().unwrap_or_default() as u64);
                let Some(event) = MediaEvent::play_rejected(generation, classify(&err)) else {
                    return;
                };
                let handler = sink.borrow().clone();
                if let Some(handler) = handler {
                    handler(event);
                }
            }) as Box<dyn FnMut(JsValue, JsValue)>)
        };

        Self {
            element,
            generation,
            sink,
            on_rejected,
        }
    }

    /// Route element events (and asynchronous play rejections) to `sink`
    ///
    /// The returned listeners must be kept alive.
    pub fn listen(&self, sink: EventSink) -> Result<Vec<Listener>, JsValue> {
        *self.sink.borrow_mut() = Some(Rc::clone(&sink));

        let mut listeners = Vec::with_capacity(ELEMENT_EVENTS.len());
        for name in ELEMENT_EVENTS {
            let element = self.element.clone();
            let generation = Rc::clone(&self.generation);
            let sink = Rc::clone(&sink);

            let listener = Closure::wrap(Box::new(move |_event: web_sys::Event| {
                let kind = match name {
                    "play" => MediaEventKind::Play,
                    "pause" => MediaEventKind::Pause,
                    "ended" => MediaEventKind::Ended,
                    "loadedmetadata" => MediaEventKind::LoadedMetadata,
                    "timeupdate" => MediaEventKind::TimeUpdate,
                    _ => MediaEventKind::Error(describe_element_error(&element)),
                };
                sink(MediaEvent::new(generation.get(), kind));
            }) as Box<dyn FnMut(web_sys::Event)>);

            self.element
                .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())?;
            listeners.push(listener);
        }
        Ok(listeners)
    }

    /// The wrapped element
    pub fn element(&self) -> &HtmlAudioElement {
        &self.element
    }
}

impl MediaSource for HtmlAudioSource {
    fn load(&mut self, url: &str, generation: LoadGeneration) {
        self.generation.set(generation);
        self.element.set_src(url);
    }

    fn play(&mut self) -> Result<(), MediaError> {
        match self.element.play() {
            Ok(promise) => {
                let issued = JsValue::from_f64(self.generation.get().get() as f64);
                let handler: &js_sys::Function = self.on_rejected.as_ref().unchecked_ref();
                catch_with(&promise, &handler.bind1(&JsValue::NULL, &issued));
                Ok(())
            }
            Err(err) => match classify(&err) {
                MediaError::Aborted => Ok(()),
                other => Err(other),
            },
        }
    }

    fn pause(&mut self) {
        let _ = self.element.pause();
    }

    fn current_time(&self) -> Duration {
        seconds(self.element.current_time()).unwrap_or(Duration::ZERO)
    }

    fn set_current_time(&mut self, position: Duration) {
        self.element.set_current_time(position.as_secs_f64());
    }

    fn duration(&self) -> Option<Duration> {
        seconds(self.element.duration())
    }

    fn volume(&self) -> f32 {
        self.element.volume() as f32
    }

    fn set_volume(&mut self, level: f32) {
        self.element.set_volume(f64::from(level.clamp(0.0, 1.0)));
    }
}

/// Attach a plain function as the promise's rejection handler
fn catch_with(promise: &js_sys::Promise, handler: &js_sys::Function) {
    let catch = js_sys::Reflect::get(promise, &JsValue::from_str("catch"))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
    if let Some(catch) = catch {
        let _ = catch.call1(promise, handler);
    }
}

/// Element times are NaN before metadata and infinite for streams
fn seconds(value: f64) -> Option<Duration> {
    (value.is_finite() && value >= 0.0).then(|| Duration::from_secs_f64(value))
}

fn classify(err: &JsValue) -> MediaError {
    let name = js_sys::Reflect::get(err, &JsValue::from_str("name"))
        .ok()
        .and_then(|v| v.as_string());
    let message = js_sys::Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| format!("{err:?}"));

    match name.as_deref() {
        Some("AbortError") => MediaError::Aborted,
        Some("NotAllowedError") => MediaError::NotAllowed(message),
        _ => MediaError::Failed(message),
    }
}

fn describe_element_error(element: &HtmlAudioElement) -> String {
    match element.error() {
        Some(error) if !error.message().is_empty() => error.message(),
        Some(error) => format!("media error code {}", error.code()),
        None => "media error".to_string(),
    }
}
