#![allow(clippy::unwrap_used)]
// Integration tests for `CmsClient` using wiremock.

use serde::Deserialize;
use serde_json::json;
use url::Url;
use wiremock::matchers::{header, headers, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bulletin::cms::{CmsClient, CmsError, Query};
use bulletin::config::SiteConfig;

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, CmsClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = CmsClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

#[derive(Debug, Deserialize, PartialEq)]
struct Row {
    id: u32,
    slug: String,
}

// ── Reads ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_read_items_unwraps_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/items/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "id": 1, "slug": "first" },
                { "id": 2, "slug": "second" }
            ]
        })))
        .mount(&server)
        .await;

    let rows: Vec<Row> = client.read_items("articles", None).await.unwrap();
    assert_eq!(
        rows,
        vec![
            Row { id: 1, slug: "first".into() },
            Row { id: 2, slug: "second".into() },
        ]
    );
}

#[tokio::test]
async fn test_read_items_sends_no_cache_headers() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/items/tags"))
        .and(headers("cache-control", vec!["no-store", "no-cache"]))
        .and(header("pragma", "no-cache"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let rows: Vec<Row> = client.read_items("tags", None).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_read_items_with_filter() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/items/events"))
        .and(query_param("filter[slug][_eq]", "spring-fair"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": 7, "slug": "spring-fair" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = Query::eq("slug", "spring-fair").limit(1);
    let rows: Vec<Row> = client.read_items("events", Some(&query)).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].slug, "spring-fair");
}

#[tokio::test]
async fn test_base_url_with_path_prefix() {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/cms/", server.uri())).unwrap();
    let client = CmsClient::with_client(reqwest::Client::new(), base_url);

    Mock::given(method("GET"))
        .and(path("/cms/items/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let rows: Vec<Row> = client.read_items("articles", None).await.unwrap();
    assert!(rows.is_empty());
}

// ── Failures ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_upstream_error_carries_directus_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/items/articles"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "errors": [{ "message": "You don't have permission to access this." }]
        })))
        .mount(&server)
        .await;

    let result = client.read_items::<Row>("articles", None).await;
    match result {
        Err(CmsError::Upstream { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "You don't have permission to access this.");
        }
        other => panic!("expected Upstream error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_service_unavailable() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/items/events"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let result = client.read_items::<Row>("events", None).await;
    assert!(
        matches!(result, Err(CmsError::Upstream { status: 503, .. })),
        "expected Upstream 503, got: {result:?}"
    );
}

#[tokio::test]
async fn test_missing_collection_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/items/articles"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client.read_items::<Row>("articles", None).await.unwrap_err();
    assert!(err.is_not_found(), "expected not found, got: {err:?}");
}

#[tokio::test]
async fn test_body_without_envelope_is_decode_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/items/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1, "slug": "x" }])))
        .mount(&server)
        .await;

    let result = client.read_items::<Row>("articles", None).await;
    match result {
        Err(CmsError::Decode { collection, .. }) => assert_eq!(collection, "articles"),
        other => panic!("expected Decode error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_cms_is_network_error() {
    // Nothing listens on the discard port
    let config = SiteConfig {
        cms_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: Some(2),
        ..SiteConfig::default()
    };
    let client = CmsClient::new(&config).unwrap();

    let result = client.read_items::<Row>("articles", None).await;
    assert!(
        matches!(result, Err(CmsError::Network(_))),
        "expected Network error, got: {result:?}"
    );
}

#[test]
fn test_invalid_base_url() {
    let config = SiteConfig {
        cms_url: "not a url".to_string(),
        ..SiteConfig::default()
    };
    assert!(matches!(
        CmsClient::new(&config),
        Err(CmsError::InvalidUrl(_))
    ));
}
