use crate::helpers::{get, mock_observations, spawn_app};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use tower::ServiceExt;

#[tokio::test]
async fn welcome_page_lists_available_routes() {
    let test_app = spawn_app(mock_observations()).await;

    let (status, html) = get(&test_app.app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Welcome to The Climate API!"));
    assert!(html.contains("/api/v1.0/precipitation"));
    assert!(html.contains("/api/v1.0/stations"));
    assert!(html.contains("/api/v1.0/tobs"));
    assert!(html.contains("/api/v1.0/temperature"));
}

#[tokio::test]
async fn welcome_page_is_served_for_empty_dataset() {
    let test_app = spawn_app(vec![]).await;

    let (status, _) = get(&test_app.app, "/").await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn api_docs_are_served() {
    let test_app = spawn_app(mock_observations()).await;

    let (status, html) = get(&test_app.app, "/docs").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.to_lowercase().contains("<!doctype html>"));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let test_app = spawn_app(mock_observations()).await;

    let (status, _) = get(&test_app.app, "/api/v2.0/stations").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cross_origin_requests_are_allowed() {
    let test_app = spawn_app(mock_observations()).await;

    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1.0/stations")
        .header(header::ORIGIN, "https://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();
    let response = test_app.app.clone().oneshot(preflight).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
    let methods = response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap();
    assert!(methods.contains("GET"));

    let request = Request::builder()
        .method(Method::GET)
        .uri("/stations")
        .header(header::ORIGIN, "https://example.com")
        .body(Body::empty())
        .unwrap();
    let response = test_app.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
