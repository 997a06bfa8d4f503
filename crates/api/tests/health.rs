//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, build_test_app, build_test_app_with, get, test_config};
use tower::ServiceExt;

// Nothing here reaches an upstream, so any base URL will do.
const UNUSED_UPSTREAM: &str = "http://127.0.0.1:9";

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let (app, _) = build_test_app(UNUSED_UPSTREAM);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["upstreams"], 7);
    assert!(json["cdn_url"].is_null());
}

#[tokio::test]
async fn health_check_reports_configured_cdn_url() {
    let mut config = test_config(UNUSED_UPSTREAM);
    config.cdn_url = Some("https://cdn.example.com".to_string());
    let app = build_test_app_with(config).0;

    let json = body_json(get(app, "/health").await).await;

    assert_eq!(json["cdn_url"], "https://cdn.example.com");
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let (app, _) = build_test_app(UNUSED_UPSTREAM);
    let response = get(app, "/api/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let (app, _) = build_test_app(UNUSED_UPSTREAM);
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");

    // MakeRequestUuid produces hyphenated UUIDs.
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn cors_preflight_returns_correct_headers() {
    let (app, _) = build_test_app(UNUSED_UPSTREAM);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/projects")
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type,authorization")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        "http://localhost:3000"
    );
    let allow_methods = headers
        .get("access-control-allow-methods")
        .expect("Missing Access-Control-Allow-Methods header")
        .to_str()
        .unwrap();
    assert!(
        allow_methods.contains("POST"),
        "Allow-Methods should contain POST, got: {allow_methods}"
    );
}
