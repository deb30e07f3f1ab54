//! Musica Catalog
//!
//! [`CatalogClient`](musica_core::CatalogClient) implementation for the
//! public iTunes Search API: song and album search, album lookup, and the
//! home-screen charts and new releases.

#![forbid(unsafe_code)]

mod client;
mod config;
mod error;
mod wire;

pub use client::ItunesCatalog;
pub use config::{CatalogConfig, DEFAULT_API_BASE};
pub use error::{CatalogError, Result};
