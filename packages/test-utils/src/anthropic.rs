//! Mock Anthropic Messages API server
//!
//! Provides a [`MockAnthropicServer`] that answers `POST /v1/messages` the way
//! the real API does, for chat passthrough and suggestion parsing tests.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Render `(title, artist, reason)` triples as the JSON array text the model
/// is asked to return
pub fn suggestion_array(suggestions: &[(&str, &str, &str)]) -> String {
    let items: Vec<serde_json::Value> = suggestions
        .iter()
        .map(|(title, artist, reason)| {
            json!({
                "songTitle": title,
                "artistName": artist,
                "reason": reason
            })
        })
        .collect();
    serde_json::Value::Array(items).to_string()
}

/// Mock Anthropic server
///
/// Wraps a [`wiremock::MockServer`] with helpers for common Messages API
/// responses.
pub struct MockAnthropicServer {
    server: MockServer,
}

impl MockAnthropicServer {
    /// Start a new mock server
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Get the server URL
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Mount a successful reply whose single text block is `text`
    pub async fn mock_text_response(&self, text: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg_mock",
                "type": "message",
                "role": "assistant",
                "model": "claude-3-haiku-20240307",
                "content": [{"type": "text", "text": text}],
                "stop_reason": "end_turn",
                "usage": {"input_tokens": 10, "output_tokens": 10}
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a reply containing a suggestion array built from the triples
    pub async fn mock_suggestions(&self, suggestions: &[(&str, &str, &str)]) {
        self.mock_text_response(&suggestion_array(suggestions)).await;
    }

    /// Mount an API error in Anthropic's error envelope
    pub async fn mock_failure(&self, status_code: u16, error_message: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(status_code).set_body_json(json!({
                "type": "error",
                "error": {"type": "api_error", "message": error_message}
            })))
            .mount(&self.server)
            .await;
    }

    /// Number of requests received on the messages endpoint
    pub async fn message_calls(&self) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == "/v1/messages")
            .count()
    }

    /// Body of the most recent messages request, if any
    pub async fn last_request_body(&self) -> Option<serde_json::Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .rev()
            .find(|r| r.url.path() == "/v1/messages")
            .and_then(|r| serde_json::from_slice(&r.body).ok())
    }

    /// Get reference to the underlying mock server for custom mock setups
    pub fn inner(&self) -> &MockServer {
        &self.server
    }
}
