//! Request helpers for API integration tests

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Send a request and decode the JSON response body (`Value::Null` when the
/// body is empty or not JSON)
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

/// `POST /invoke` with the given tool and input
pub async fn invoke(app: Router, tool: &str, input: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/invoke")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"tool": tool, "input": input}).to_string()))
        .unwrap();
    send(app, request).await
}

/// Encode a `mood_recommendations` input string
pub fn mood_input(mood: &str, preferences: Option<&str>) -> String {
    json!({"mood": mood, "preferences": preferences}).to_string()
}
