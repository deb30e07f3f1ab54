//! Catalog client tests against a mock iTunes server.

use musica_catalog::{CatalogConfig, CatalogError, ItunesCatalog};
use musica_core::{AlbumId, CatalogClient, CoreError, SearchKind, TrackId};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Helpers
// =============================================================================

fn song(id: i64, name: &str, preview: Option<&str>) -> Value {
    let mut row = json!({
        "wrapperType": "track",
        "kind": "song",
        "trackId": id,
        "trackName": name,
        "artistName": "Artist",
        "collectionId": 500,
        "collectionName": "Record",
        "artworkUrl100": "https://is1.example.com/thumb/100x100bb.jpg",
        "trackTimeMillis": 30_000
    });
    if let Some(url) = preview {
        row["previewUrl"] = json!(url);
    }
    row
}

fn album(id: i64, name: &str) -> Value {
    json!({
        "wrapperType": "collection",
        "collectionType": "Album",
        "collectionId": id,
        "collectionName": name,
        "artistName": "Artist",
        "artworkUrl100": "https://is1.example.com/thumb/100x100bb.jpg",
        "trackCount": 10
    })
}

fn body(results: Vec<Value>) -> Value {
    json!({ "resultCount": results.len(), "results": results })
}

fn catalog_for(server: &MockServer) -> ItunesCatalog {
    ItunesCatalog::new(CatalogConfig::with_base(server.uri())).unwrap()
}

// =============================================================================
// Search
// =============================================================================

mod search {
    use super::*;

    #[tokio::test]
    async fn test_song_search_sends_query_and_decodes_tracks() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("term", "daft punk"))
            .and(query_param("entity", "song"))
            .and(query_param("limit", "12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body(vec![
                song(1, "One More Time", Some("https://audio.example.com/1.m4a")),
                song(2, "Aerodynamic", None),
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let catalog = catalog_for(&server);
        let items = catalog
            .search_default("daft punk", SearchKind::Song)
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
        let first = items[0].clone().into_track().unwrap();
        assert_eq!(first.id, TrackId::new(1));
        assert_eq!(first.title, "One More Time");
        assert_eq!(first.album_id, Some(AlbumId::new(500)));
    }

    #[tokio::test]
    async fn test_search_tracks_keeps_only_playable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body(vec![
                song(1, "Has Preview", Some("https://audio.example.com/1.m4a")),
                song(2, "No Preview", None),
            ])))
            .mount(&server)
            .await;

        let catalog = catalog_for(&server);
        let tracks = catalog.search_tracks("anything", 5).await.unwrap();

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, TrackId::new(1));
    }

    #[tokio::test]
    async fn test_album_search_decodes_collections() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("entity", "album"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(body(vec![album(10, "Discovery"), album(11, "Homework")])),
            )
            .mount(&server)
            .await;

        let catalog = catalog_for(&server);
        let albums = catalog.search_albums("daft punk", 2).await.unwrap();

        let titles: Vec<&str> = albums.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Discovery", "Homework"]);
        assert_eq!(albums[0].track_count, Some(10));
    }

    #[tokio::test]
    async fn test_blank_term_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body(vec![])))
            .expect(0)
            .mount(&server)
            .await;

        let catalog = catalog_for(&server);
        let items = catalog.search_items("   ", SearchKind::Song, 5).await.unwrap();
        assert!(items.is_empty());
    }
}

// =============================================================================
// Album lookup
// =============================================================================

mod lookup {
    use super::*;

    #[tokio::test]
    async fn test_first_result_is_album_rest_are_tracks() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lookup"))
            .and(query_param("id", "500"))
            .and(query_param("entity", "song"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body(vec![
                album(500, "Record"),
                song(1, "Intro", Some("https://audio.example.com/1.m4a")),
                song(2, "Interlude", None),
                song(3, "Outro", Some("https://audio.example.com/3.m4a")),
            ])))
            .mount(&server)
            .await;

        let catalog = catalog_for(&server);
        let detail = catalog.lookup_album(AlbumId::new(500)).await.unwrap();

        assert_eq!(detail.album.id, AlbumId::new(500));
        assert_eq!(detail.album.title, "Record");
        let ids: Vec<i64> = detail.tracks.iter().map(|t| t.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(detail.total_duration_ms(), 60_000);
    }

    #[tokio::test]
    async fn test_empty_lookup_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lookup"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body(vec![])))
            .mount(&server)
            .await;

        let catalog = catalog_for(&server);

        let err = catalog.album(AlbumId::new(9)).await.unwrap_err();
        assert!(matches!(err, CatalogError::AlbumNotFound(id) if id == AlbumId::new(9)));

        let err = catalog.lookup_album(AlbumId::new(9)).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }
}

// =============================================================================
// Home screen
// =============================================================================

mod home {
    use super::*;

    #[tokio::test]
    async fn test_charts_search_top_hits_with_chart_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("term", "top hits"))
            .and(query_param("entity", "song"))
            .and(query_param("limit", "8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body(vec![
                song(1, "Hit", Some("https://audio.example.com/1.m4a")),
                song(2, "Silent", None),
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let catalog = catalog_for(&server);
        let charts = catalog.charts().await.unwrap();

        assert_eq!(charts.len(), 1);
        assert!(charts[0].is_playable());
    }

    #[tokio::test]
    async fn test_new_releases_search_new_music_albums() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("term", "new music"))
            .and(query_param("entity", "album"))
            .and(query_param("limit", "12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body(vec![album(1, "Fresh")])))
            .expect(1)
            .mount(&server)
            .await;

        let catalog = catalog_for(&server);
        let releases = catalog.new_releases().await.unwrap();

        assert_eq!(releases.len(), 1);
        assert_eq!(releases[0].title, "Fresh");
    }
}

// =============================================================================
// Failures
// =============================================================================

mod failures {
    use super::*;

    #[tokio::test]
    async fn test_error_status_is_fetch_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let catalog = catalog_for(&server);
        let err = catalog
            .search_items("x", SearchKind::Song, 1)
            .await
            .unwrap_err();

        match err {
            CatalogError::FetchFailed(msg) => assert!(msg.contains("503")),
            other => panic!("Expected FetchFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_fetch_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let catalog = catalog_for(&server);
        let err = catalog.search("x", SearchKind::Song, 1).await.unwrap_err();
        assert!(matches!(err, CoreError::FetchFailed(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_fetch_failure() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let catalog = ItunesCatalog::new(CatalogConfig::with_base(uri)).unwrap();
        let err = catalog.charts().await.unwrap_err();
        assert!(matches!(err, CatalogError::FetchFailed(_)));
    }
}
