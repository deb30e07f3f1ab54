//! HTTP catalog client.

use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};
use crate::wire::{RawItem, SearchResponse};
use async_trait::async_trait;
use musica_core::{Album, AlbumDetail, AlbumId, CatalogClient, CatalogItem, SearchKind, Track};
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

const CHARTS_TERM: &str = "top hits";
const NEW_RELEASES_TERM: &str = "new music";

/// Catalog backed by the iTunes Search API
///
/// # Example
///
/// ```ignore
/// use musica_catalog::{CatalogConfig, ItunesCatalog};
///
/// let catalog = ItunesCatalog::new(CatalogConfig::default())?;
/// let charts = catalog.charts().await?;
/// println!("{} chart previews", charts.len());
/// ```
#[derive(Debug, Clone)]
pub struct ItunesCatalog {
    http: Client,
    base: Url,
    config: CatalogConfig,
}

impl ItunesCatalog {
    /// Create a client for `config.api_base`
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let trimmed = config.api_base.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::InvalidUrl("URL cannot be empty".into()));
        }
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(CatalogError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        // Endpoints are joined relative to the base, which needs a trailing slash
        let base = Url::parse(&format!("{}/", trimmed.trim_end_matches('/')))
            .map_err(|e| CatalogError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(format!("Musica/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base, config })
    }

    /// Client settings
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Search with the configured default limit
    pub async fn search_default(&self, term: &str, kind: SearchKind) -> Result<Vec<CatalogItem>> {
        self.search_items(term, kind, self.config.default_limit).await
    }

    /// Search for `term`
    ///
    /// Rows that do not match `kind` are skipped. A blank term returns no
    /// results without a request.
    pub async fn search_items(
        &self,
        term: &str,
        kind: SearchKind,
        limit: u32,
    ) -> Result<Vec<CatalogItem>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.endpoint(
            "search",
            &[
                ("term", term.to_string()),
                ("entity", kind.as_entity().to_string()),
                ("limit", limit.to_string()),
            ],
        )?;
        let response = self.fetch(url).await?;

        let items: Vec<CatalogItem> = response
            .results
            .into_iter()
            .filter_map(|row| match kind {
                SearchKind::Song => row.into_track().map(CatalogItem::Track),
                SearchKind::Album => row.into_album().map(CatalogItem::Album),
            })
            .collect();

        debug!(term, entity = kind.as_entity(), hits = items.len(), "Search finished");
        Ok(items)
    }

    /// Album metadata plus its previewable tracks
    pub async fn album(&self, id: AlbumId) -> Result<AlbumDetail> {
        let url = self.endpoint(
            "lookup",
            &[("id", id.to_string()), ("entity", "song".to_string())],
        )?;
        let response = self.fetch(url).await?;

        let mut rows = response.results.into_iter();
        let album = rows
            .next()
            .and_then(RawItem::into_album)
            .ok_or(CatalogError::AlbumNotFound(id))?;

        let tracks: Vec<Track> = rows
            .filter_map(RawItem::into_track)
            .filter(Track::is_playable)
            .collect();

        debug!(album_id = %id, tracks = tracks.len(), "Album lookup finished");
        Ok(AlbumDetail { album, tracks })
    }

    /// Home-screen chart tracks, previewable only
    pub async fn charts(&self) -> Result<Vec<Track>> {
        let items = self
            .search_items(CHARTS_TERM, SearchKind::Song, self.config.chart_limit)
            .await?;
        Ok(items
            .into_iter()
            .filter_map(CatalogItem::into_track)
            .filter(Track::is_playable)
            .collect())
    }

    /// Home-screen new release albums
    pub async fn new_releases(&self) -> Result<Vec<Album>> {
        let items = self
            .search_items(NEW_RELEASES_TERM, SearchKind::Album, self.config.default_limit)
            .await?;
        Ok(items.into_iter().filter_map(CatalogItem::into_album).collect())
    }

    // ===== Internal =====

    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let mut url = self
            .base
            .join(path)
            .map_err(|e| CatalogError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        Ok(url)
    }

    async fn fetch(&self, url: Url) -> Result<SearchResponse> {
        debug!(url = %url, "Fetching catalog");

        let response = self.http.get(url).send().await.map_err(|e| {
            warn!(error = %e, "Catalog request failed");
            CatalogError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Catalog returned an error status");
            return Err(CatalogError::fetch_failed(format!("HTTP {}", status.as_u16())));
        }

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| CatalogError::fetch_failed(format!("Failed to parse response: {e}")))
    }
}

#[async_trait]
impl CatalogClient for ItunesCatalog {
    async fn search(
        &self,
        term: &str,
        kind: SearchKind,
        limit: u32,
    ) -> musica_core::Result<Vec<CatalogItem>> {
        Ok(self.search_items(term, kind, limit).await?)
    }

    async fn lookup_album(&self, id: AlbumId) -> musica_core::Result<AlbumDetail> {
        Ok(self.album(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_base_urls() {
        assert!(matches!(
            ItunesCatalog::new(CatalogConfig::with_base("")),
            Err(CatalogError::InvalidUrl(_))
        ));
        assert!(matches!(
            ItunesCatalog::new(CatalogConfig::with_base("itunes.apple.com")),
            Err(CatalogError::InvalidUrl(_))
        ));
    }

    #[test]
    fn endpoints_keep_base_path_and_encode_terms() {
        let config = CatalogConfig::with_base("https://proxy.example.com/itunes/");
        let catalog = ItunesCatalog::new(config).unwrap();
        let url = catalog
            .endpoint("search", &[("term", "daft punk & co".to_string())])
            .unwrap();

        assert_eq!(url.path(), "/itunes/search");
        assert_eq!(url.query(), Some("term=daft+punk+%26+co"));
    }
}
