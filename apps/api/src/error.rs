//! Error handling for the MoodMix API
//!
//! Every failure of `POST /invoke` funnels through [`ApiError`], which maps to
//! an HTTP status and the `{error, details, fullError}` body the chat UI
//! expects.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use moodmix_anthropic_client::AnthropicError;
use moodmix_shared_config::Environment;
use moodmix_spotify_client::SpotifyError;
use serde::Serialize;
use thiserror::Error;

/// API error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Short, fixed error label
    pub error: &'static str,
    /// Best-effort description of what went wrong
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Raw upstream error body, only exposed in development
    #[serde(rename = "fullError", skip_serializing_if = "Option::is_none")]
    pub full_error: Option<serde_json::Value>,
}

/// Main API error type
#[derive(Error, Debug)]
pub enum ApiError {
    /// `tool` named something other than the three known tools
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// Request body was not a JSON `{tool, input}` object
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Tool input could not be decoded
    #[error("malformed tool input: {0}")]
    MalformedInput(String),

    /// A call to the model or catalog API failed
    #[error("{service} request failed: {message}")]
    Upstream {
        service: &'static str,
        message: String,
        body: Option<serde_json::Value>,
    },

    /// Internal server error (catch-all for unexpected errors)
    #[error("internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UnknownTool(_) | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::MalformedInput(_) | Self::Upstream { .. } | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error code string used in logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownTool(_) => "UNKNOWN_TOOL",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::MalformedInput(_) => "MALFORMED_INPUT",
            Self::Upstream { .. } => "UPSTREAM_CALL_FAILED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Build the response body, including the upstream body when
    /// `expose_upstream` is set
    pub fn to_body(&self, expose_upstream: bool) -> ErrorResponse {
        match self {
            Self::UnknownTool(_) => ErrorResponse {
                error: "Unknown tool",
                details: None,
                full_error: None,
            },
            Self::InvalidBody(message) => ErrorResponse {
                error: "Invalid request body",
                details: Some(message.clone()),
                full_error: None,
            },
            Self::MalformedInput(message) | Self::Internal(message) => ErrorResponse {
                error: "Invocation failed",
                details: Some(message.clone()),
                full_error: None,
            },
            Self::Upstream { message, body, .. } => ErrorResponse {
                error: "Invocation failed",
                details: Some(message.clone()),
                full_error: body.clone().filter(|_| expose_upstream),
            },
        }
    }

    /// Render for the given environment; `fullError` only appears in
    /// development
    pub fn into_response_for(self, environment: Environment) -> Response {
        self.log();
        let body = self.to_body(environment.is_development());
        (self.status_code(), Json(body)).into_response()
    }

    /// Log the error with appropriate severity based on status code
    pub fn log(&self) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Server error occurred"
            );
        } else {
            tracing::debug!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Client error"
            );
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.into_response_for(Environment::Production)
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

// ========== Conversion Implementations ==========

impl From<AnthropicError> for ApiError {
    fn from(err: AnthropicError) -> Self {
        Self::Upstream {
            service: "anthropic",
            message: err.upstream_message(),
            body: err.upstream_body().cloned(),
        }
    }
}

impl From<SpotifyError> for ApiError {
    fn from(err: SpotifyError) -> Self {
        Self::Upstream {
            service: "spotify",
            message: err.upstream_message(),
            body: err.upstream_body().cloned(),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ApiError>() {
            Ok(api_err) => api_err,
            Err(err) => Self::Internal(err.to_string()),
        }
    }
}
