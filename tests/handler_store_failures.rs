mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use std::time::Duration;

use common::{
    API_HOST, HangingRepository, UnavailableRepository, create_server_with, create_test_router,
    send,
};

#[tokio::test]
async fn test_resolve_with_store_down_is_server_error() {
    let server = create_server_with(
        Arc::new(UnavailableRepository),
        StatusCode::BAD_REQUEST,
        "/prod",
    );

    let response = server.get("/prod/aB3dE5gH").await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.text(), "Mapping store unavailable");
    assert!(response.maybe_header("location").is_none());
}

#[tokio::test]
async fn test_create_with_store_down_is_server_error() {
    let server = create_server_with(
        Arc::new(UnavailableRepository),
        StatusCode::BAD_REQUEST,
        "/prod",
    );

    let response = server
        .get("/prod/")
        .add_query_param("targetUrl", "https://example.com")
        .add_header("Host", API_HOST)
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(!response.text().contains("connection refused"));
}

#[tokio::test]
async fn test_store_timeout_is_server_error() {
    let server = create_server_with(
        Arc::new(HangingRepository),
        StatusCode::BAD_REQUEST,
        "/prod",
    );

    let response = server.get("/prod/aB3dE5gH").await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_request_timeout_answers_408() {
    // Store bound is 500ms, so the whole-request bound fires first.
    let router = create_test_router(
        Arc::new(HangingRepository),
        "/prod",
        Duration::from_millis(50),
    );

    let request = Request::builder()
        .uri("/prod/aB3dE5gH")
        .header("Host", API_HOST)
        .body(Body::empty())
        .unwrap();
    let (status, _content_type, _body) = send(router, request).await;

    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
}

#[tokio::test]
async fn test_usage_needs_no_store() {
    let server = create_server_with(
        Arc::new(UnavailableRepository),
        StatusCode::BAD_REQUEST,
        "/prod",
    );

    let response = server.get("/prod/").await;

    response.assert_status_ok();
    assert_eq!(response.text(), "usage: ?targetUrl=URL");
}
