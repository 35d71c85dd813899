use super::*;
use crate::config::ApiConfig;
use crate::error::{ApiError, FeedExportError};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> NeynarClient {
    let config = ApiConfig {
        base_url: server.uri(),
        ..ApiConfig::default()
    };
    NeynarClient::new(&config, "test-key").unwrap()
}

fn request(cursor: Option<&str>) -> FeedRequest {
    FeedRequest {
        channel_id: "memes".to_string(),
        cursor: cursor.map(str::to_string),
        limit: 25,
    }
}

#[tokio::test]
async fn test_fetch_page_sends_filter_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/farcaster/feed"))
        .and(header("x-api-key", "test-key"))
        .and(query_param("feed_type", "filter"))
        .and(query_param("filter_type", "channel_id"))
        .and(query_param("channel_id", "memes"))
        .and(query_param("limit", "25"))
        .and(query_param_is_missing("cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "casts": [{ "hash": "0x1", "text": "gm" }],
            "next": { "cursor": "page-2" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server).fetch_page(&request(None)).await.unwrap();

    assert_eq!(page.casts.len(), 1);
    assert_eq!(page.casts[0].text.as_deref(), Some("gm"));
    assert_eq!(page.next_cursor(), Some("page-2"));
}

#[tokio::test]
async fn test_fetch_page_forwards_cursor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/farcaster/feed"))
        .and(query_param("cursor", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "casts": [],
            "next": { "cursor": null }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .fetch_page(&request(Some("page-2")))
        .await
        .unwrap();

    assert!(page.casts.is_empty());
    assert_eq!(page.next_cursor(), None);
}

#[tokio::test]
async fn test_unauthorized_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid API key" })),
        )
        .mount(&server)
        .await;

    let result = client_for(&server).fetch_page(&request(None)).await;

    match result {
        Err(FeedExportError::Api(ApiError::Unauthorized(msg))) => {
            assert_eq!(msg, "Invalid API key")
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_bad_request_carries_status_and_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Channel not found" })),
        )
        .mount(&server)
        .await;

    let result = client_for(&server).fetch_page(&request(None)).await;

    match result {
        Err(FeedExportError::Api(ApiError::RequestFailed { status, message })) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Channel not found");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_error_without_json_body_uses_reason() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let result = client_for(&server).fetch_page(&request(None)).await;

    match result {
        Err(FeedExportError::Api(ApiError::RequestFailed { status, message })) => {
            assert_eq!(status, 503);
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{ not json"))
        .mount(&server)
        .await;

    let result = client_for(&server).fetch_page(&request(None)).await;

    assert!(matches!(
        result,
        Err(FeedExportError::Api(ApiError::InvalidResponse(_)))
    ));
}

#[tokio::test]
async fn test_pager_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param_is_missing("cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "casts": [{ "hash": "0x1" }, { "hash": "0x2" }],
            "next": { "cursor": "c2" }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("cursor", "c2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "casts": [{ "hash": "0x3" }],
            "next": { "cursor": null }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut pager = ChannelPager::new(&client, "memes", 10, 25);
    let records = pager.collect_all().await.unwrap();

    let hashes: Vec<_> = records.iter().map(|r| r.hash.as_str()).collect();
    assert_eq!(hashes, vec!["0x1", "0x2", "0x3"]);
    assert_eq!(pager.pages_fetched(), 2);
}
