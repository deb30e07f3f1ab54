//! WASM bindings for musica-playback
//!
//! Binds the controller to an `HtmlAudioElement` and exposes a
//! JavaScript-friendly API.

pub mod controller;
pub mod media;

pub use controller::WasmPlaybackController;
pub use media::HtmlAudioSource;
