//! Catalog client configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Public iTunes Search API
pub const DEFAULT_API_BASE: &str = "https://itunes.apple.com";

/// Settings for [`ItunesCatalog`](crate::ItunesCatalog)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base URL the `search` and `lookup` endpoints hang off
    pub api_base: String,

    /// Result limit for user searches and new releases
    pub default_limit: u32,

    /// Result limit for the home-screen charts
    pub chart_limit: u32,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            default_limit: 12,
            chart_limit: 8,
            timeout_secs: 15,
        }
    }
}

impl CatalogConfig {
    /// Config pointing at another base URL
    pub fn with_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            ..Self::default()
        }
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
