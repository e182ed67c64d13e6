//! Notification webhook integration tests
//!
//! Drives the full router with `tower::ServiceExt::oneshot`, an in-memory
//! directory and a wiremock push gateway.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use hearth::backend::notify::{Dispatcher, ExpoPushGateway, InMemoryDirectory};
use hearth::backend::server::create_app;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn directory() -> InMemoryDirectory {
    InMemoryDirectory::new()
        .with_couple("c1", "alice", "bob")
        .with_profile("alice", Some("Alice"), Some("ExponentPushToken[alice]"))
        .with_profile("bob", Some("Bob"), Some("ExponentPushToken[bob]"))
        .with_profile("carol", Some("Carol"), None)
        .with_couple("c2", "dave", "carol")
}

async fn app(server: &MockServer, directory: Arc<InMemoryDirectory>) -> Router {
    let gateway = ExpoPushGateway::new(format!("{}/push", server.uri()), Duration::from_secs(2)).unwrap();
    create_app(Dispatcher::new(directory, Arc::new(gateway)))
}

async fn post(app: Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/webhooks/notify")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn insert(table: &str, record: Value) -> String {
    json!({ "type": "INSERT", "table": table, "schema": "public", "record": record, "old_record": null }).to_string()
}

#[tokio::test]
async fn test_message_insert_pushes_to_partner() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/push"))
        .and(body_partial_json(json!({
            "to": "ExponentPushToken[bob]",
            "title": "Alice",
            "body": "on my way",
            "data": { "deepLink": "hearth://chat" },
            "sound": "default"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let app = app(&server, Arc::new(directory())).await;
    let (status, body) = post(
        app,
        insert("messages", json!({ "id": "m1", "couple_id": "c1", "sender_id": "alice", "content": "on my way" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "sent");
    assert_eq!(body["delivered"], true);
}

#[tokio::test]
async fn test_surprise_and_message_deep_links_differ() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let directory = Arc::new(directory());
    let (_, message) = post(
        app(&server, directory.clone()).await,
        insert("messages", json!({ "couple_id": "c1", "sender_id": "bob", "content": "hi" })),
    )
    .await;
    let (_, surprise) = post(
        app(&server, directory).await,
        insert("surprises", json!({ "id": "s1", "coupleId": "c1", "senderId": "bob", "title": "Check the fridge" })),
    )
    .await;

    assert_eq!(message["notification"]["data"]["deepLink"], "hearth://chat");
    assert_eq!(surprise["notification"]["data"]["deepLink"], "hearth://surprises/s1");
    assert_eq!(surprise["notification"]["title"], "Bob sent you a surprise");
    assert_eq!(surprise["notification"]["to"], "ExponentPushToken[alice]");
}

#[tokio::test]
async fn test_recipient_without_token_never_calls_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = post(
        app(&server, Arc::new(directory())).await,
        insert("messages", json!({ "couple_id": "c2", "sender_id": "dave", "content": "hey" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "skipped");
}

#[tokio::test]
async fn test_update_is_ignored_without_lookups() {
    let server = MockServer::start().await;
    let directory = Arc::new(directory());

    let event = json!({
        "type": "UPDATE",
        "table": "messages",
        "record": { "couple_id": "c1", "sender_id": "alice", "content": "edited" },
        "old_record": { "couple_id": "c1", "sender_id": "alice", "content": "typo" }
    });
    let (status, body) = post(app(&server, directory.clone()).await, event.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ignored");
    assert_eq!(directory.lookups(), 0);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_couple_is_404() {
    let server = MockServer::start().await;
    let (status, body) = post(
        app(&server, Arc::new(directory())).await,
        insert("messages", json!({ "couple_id": "ghost", "sender_id": "alice" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "couple not found", "status": 404 }));
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let server = MockServer::start().await;
    let (status, body) = post(app(&server, Arc::new(directory())).await, "{ not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_missing_sender_is_400() {
    let server = MockServer::start().await;
    let (status, _) = post(
        app(&server, Arc::new(directory())).await,
        insert("messages", json!({ "couple_id": "c1", "content": "who am i" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_gateway_failure_still_answers_200() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = post(
        app(&server, Arc::new(directory())).await,
        insert("messages", json!({ "couple_id": "c1", "sender_id": "alice", "content": "hi" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "sent");
    assert_eq!(body["delivered"], false);
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    let response = app(&server, Arc::new(directory()))
        .await
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}
