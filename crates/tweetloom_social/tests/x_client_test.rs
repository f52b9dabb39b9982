//! Contract tests for the X API v2 client against a mock server.

use serde_json::json;
use tweetloom_error::PostErrorKind;
use tweetloom_history::PostMetrics;
use tweetloom_social::{Poster, XClient};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client(server: &MockServer) -> XClient {
    XClient::new("test-token", server.uri()).unwrap()
}

#[tokio::test]
async fn test_post_returns_receipt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(json!({"text": "gm #Bitcoin"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {"id": "1850000000000000001", "text": "gm #Bitcoin"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let receipt = client(&server).await.post("gm #Bitcoin").await.unwrap();
    assert_eq!(receipt.id(), "1850000000000000001");
    assert_eq!(receipt.text(), "gm #Bitcoin");
}

#[tokio::test]
async fn test_post_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let err = client(&server).await.post("hello").await.unwrap_err();
    assert!(matches!(err.kind, PostErrorKind::Unauthorized(_)));
    assert!(!err.is_recoverable());
}

#[tokio::test]
async fn test_post_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "120"))
        .mount(&server)
        .await;

    let err = client(&server).await.post("hello").await.unwrap_err();
    assert_eq!(err.kind, PostErrorKind::RateLimited(120));
    assert!(err.is_recoverable());
}

#[tokio::test]
async fn test_post_duplicate_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "detail": "You are not allowed to create a Tweet with duplicate content."
        })))
        .mount(&server)
        .await;

    let err = client(&server).await.post("again").await.unwrap_err();
    match err.kind {
        PostErrorKind::Api { status, message } => {
            assert_eq!(status, 403);
            assert!(message.contains("duplicate"));
        }
        other => panic!("unexpected error kind: {other}"),
    }
}

#[tokio::test]
async fn test_post_without_data_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"errors": []})))
        .mount(&server)
        .await;

    let err = client(&server).await.post("hello").await.unwrap_err();
    assert!(matches!(err.kind, PostErrorKind::InvalidResponse(_)));
}

#[tokio::test]
async fn test_identity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "42", "name": "Loom Bot", "username": "loombot"}
        })))
        .mount(&server)
        .await;

    let identity = client(&server).await.identity().await.unwrap().unwrap();
    assert_eq!(identity.id(), "42");
    assert_eq!(identity.name(), "Loom Bot");
    assert_eq!(identity.handle(), "loombot");
}

#[tokio::test]
async fn test_metrics() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/tweets/77"))
        .and(query_param("tweet.fields", "public_metrics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": "77",
                "text": "hello",
                "public_metrics": {
                    "retweet_count": 3,
                    "reply_count": 2,
                    "like_count": 20,
                    "quote_count": 1,
                    "impression_count": 1000
                }
            }
        })))
        .mount(&server)
        .await;

    let metrics = client(&server).await.metrics("77").await.unwrap().unwrap();
    assert_eq!(metrics, PostMetrics::new(1000, 20, 3, 2));
}

#[tokio::test]
async fn test_metrics_for_deleted_post() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/tweets/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(client(&server).await.metrics("404").await.unwrap().is_none());
}

#[tokio::test]
async fn test_server_error_is_recoverable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/users/me"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client(&server).await.identity().await.unwrap_err();
    assert!(err.is_recoverable());
}

#[test]
fn test_empty_token_rejected() {
    let err = XClient::new("  ", "https://api.twitter.com").unwrap_err();
    assert!(matches!(err.kind, PostErrorKind::MissingCredentials(_)));
}
