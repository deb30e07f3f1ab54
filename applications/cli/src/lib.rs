//! Musica CLI
//!
//! Terminal front-end wiring the catalog client, the library store, and a
//! headless playback controller together.

pub mod config;
pub mod error;
pub mod render;
pub mod walk;

pub use config::AppConfig;
pub use error::{CliError, Result};
