#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum_test::TestServer;
use tower::ServiceExt;
use std::sync::Arc;
use std::time::Duration;

use link_redirector::application::services::{MappingService, StorePolicy};
use link_redirector::domain::repositories::{MappingRepository, StoreError, WriteMode};
use link_redirector::infrastructure::persistence::MemoryMappingRepository;
use link_redirector::routes::app_router;
use link_redirector::state::AppState;
use link_redirector::utils::code_generator::RandomCodeGenerator;

pub const API_HOST: &str = "abc123.execute-api.us-east-1.amazonaws.com";

pub fn test_policy() -> StorePolicy {
    StorePolicy {
        timeout: Duration::from_millis(500),
        max_retries: 1,
        write_mode: WriteMode::CreateOnly,
        max_code_attempts: 5,
    }
}

pub fn create_test_state(
    repository: Arc<dyn MappingRepository>,
    not_found_status: StatusCode,
) -> AppState {
    let service = MappingService::new(
        repository,
        Arc::new(RandomCodeGenerator::default()),
        test_policy(),
    );

    AppState::new(Arc::new(service), "https", not_found_status)
}

/// Server mounted under `/prod` on a fresh in-memory store.
pub fn create_test_server() -> (TestServer, Arc<MemoryMappingRepository>) {
    let repository = Arc::new(MemoryMappingRepository::new());
    let server = create_server_with(repository.clone(), StatusCode::BAD_REQUEST, "/prod");
    (server, repository)
}

pub fn create_server_with(
    repository: Arc<dyn MappingRepository>,
    not_found_status: StatusCode,
    base_path: &str,
) -> TestServer {
    let state = create_test_state(repository, not_found_status);
    let app = app_router(state, base_path, Duration::from_secs(5));
    TestServer::new(app).unwrap()
}

/// Bare router for requests `TestServer` cannot shape, such as HTTP/2 or
/// origin-form URIs without a `Host` header.
pub fn create_test_router(
    repository: Arc<dyn MappingRepository>,
    base_path: &str,
    request_timeout: Duration,
) -> Router {
    let state = create_test_state(repository, StatusCode::BAD_REQUEST);
    app_router(state, base_path, request_timeout)
}

/// Sends one request through `router`, returning status, content type and body.
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Option<String>, String) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

/// Pulls the code out of a `Created URL: ...` body.
pub fn code_from_body(body: &str, url_prefix: &str) -> String {
    body.strip_prefix("Created URL: ")
        .and_then(|url| url.strip_prefix(url_prefix))
        .unwrap_or_else(|| panic!("unexpected create body: {body}"))
        .to_string()
}

/// Store whose backend is always down.
pub struct UnavailableRepository;

#[async_trait]
impl MappingRepository for UnavailableRepository {
    async fn put(&self, _code: &str, _target_url: &str, _mode: WriteMode) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn get(&self, _code: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

/// Store whose calls never finish.
pub struct HangingRepository;

#[async_trait]
impl MappingRepository for HangingRepository {
    async fn put(&self, _code: &str, _target_url: &str, _mode: WriteMode) -> Result<(), StoreError> {
        std::future::pending().await
    }

    async fn get(&self, _code: &str) -> Result<Option<String>, StoreError> {
        std::future::pending().await
    }

    async fn health_check(&self) -> bool {
        std::future::pending().await
    }
}
