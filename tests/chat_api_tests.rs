//! Integration tests for the chat HTTP surface
//!
//! These drive the router directly with `tower::ServiceExt::oneshot`;
//! none of them touch the network.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use climate_insights::config::ClimateConfig;
use climate_insights::web::{build_state, router, AppState};
use serde_json::json;
use tower::ServiceExt;

/// Router in the unconfigured state: no Gemini key, no log store
fn app_without_gemini_key() -> axum::Router {
    router(AppState { service: None })
}

fn chat_request(message: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "message": message }).to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let app = app_without_gemini_key();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn chat_without_api_key_short_circuits() {
    // The fixed configuration error must come back before any outbound
    // call is attempted; this test has no network access to fall back on.
    let app = app_without_gemini_key();

    let response = app.oneshot(chat_request("weather in Paris")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed, json!({ "error": "Gemini API key not configured" }));
}

#[tokio::test]
async fn chat_rejects_malformed_body() {
    let app = app_without_gemini_key();

    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn chat_rejects_missing_message_field() {
    let app = app_without_gemini_key();

    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "text": "hi" }).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}

#[test]
fn build_state_without_key_disables_service() {
    let config = ClimateConfig::default();
    let state = build_state(&config).unwrap();
    assert!(state.service.is_none());
}

#[test]
fn build_state_with_key_enables_service() {
    let mut config = ClimateConfig::default();
    config.gemini.api_key = Some("test-key".to_string());
    let state = build_state(&config).unwrap();
    assert!(state.service.is_some());
}
