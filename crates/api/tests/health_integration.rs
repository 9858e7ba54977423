//! Integration tests for health, metrics and cross-cutting middleware.

mod common;

use axum::http::StatusCode;
use common::{
    create_memory_app, create_memory_app_with_store, get_request, parse_response_body,
    test_config,
};
use domain::store::InMemoryStore;
use tower::ServiceExt;

#[tokio::test]
async fn test_health_check() {
    let app = create_memory_app(test_config());
    let response = app.oneshot(get_request("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["database"]["connected"], true);
}

#[tokio::test]
async fn test_health_reports_outage() {
    let app = create_memory_app_with_store(test_config(), InMemoryStore::unavailable());

    let response = app
        .clone()
        .oneshot(get_request("/api/health"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(parse_response_body(response).await["status"], "unhealthy");

    let response = app
        .clone()
        .oneshot(get_request("/api/health/ready"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let response = app
        .oneshot(get_request("/api/health/live"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_probes() {
    let app = create_memory_app(test_config());

    let response = app
        .clone()
        .oneshot(get_request("/api/health/live"))
        .await
        .unwrap();
    assert_eq!(parse_response_body(response).await["status"], "alive");

    let response = app
        .oneshot(get_request("/api/health/ready"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_response_body(response).await["status"], "ready");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = create_memory_app(test_config());

    let mut request = get_request("/api/health/live");
    request
        .headers_mut()
        .insert("x-request-id", "trace-me-42".parse().unwrap());
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "trace-me-42");

    let response = app
        .oneshot(get_request("/api/health/live"))
        .await
        .unwrap();
    let generated = response.headers()["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok());
}

#[tokio::test]
async fn test_security_headers() {
    let mut config = test_config();
    config.security.hsts_enabled = true;
    let app = create_memory_app(config);

    let response = app
        .oneshot(get_request("/api/v1/locations"))
        .await
        .unwrap();
    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert!(headers.contains_key("strict-transport-security"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_memory_app(test_config());
    let response = app
        .oneshot(get_request("/api/v1/users"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
