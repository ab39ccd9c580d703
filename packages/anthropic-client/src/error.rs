//! Error types for the Anthropic client

use thiserror::Error;

/// Errors that can occur when calling the Messages API
#[derive(Error, Debug)]
pub enum AnthropicError {
    /// API key is missing
    #[error("API key is required for Anthropic API access")]
    MissingApiKey,

    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Failed to serialize/deserialize JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// API returned a non-success status
    #[error("Anthropic API error (status {status}): {message}")]
    ApiError {
        status: u16,
        message: String,
        /// Parsed error body, when the body was JSON
        body: Option<serde_json::Value>,
    },

    /// Response was well-formed JSON but not usable
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl AnthropicError {
    /// Best-effort human readable message for callers that surface upstream
    /// failures (the API `error.message`, when there was one)
    pub fn upstream_message(&self) -> String {
        match self {
            Self::ApiError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Raw upstream error body, if any
    pub fn upstream_body(&self) -> Option<&serde_json::Value> {
        match self {
            Self::ApiError { body, .. } => body.as_ref(),
            _ => None,
        }
    }
}

/// Pull a message out of an Anthropic error body.
///
/// Tries `error.message`, then a bare string `error`, falling back to `None`.
pub(crate) fn message_from_body(body: &serde_json::Value) -> Option<String> {
    let error = body.get("error")?;
    error
        .get("message")
        .and_then(|m| m.as_str())
        .or_else(|| error.as_str())
        .map(str::to_string)
}

/// Result type for Anthropic operations
pub type AnthropicResult<T> = Result<T, AnthropicError>;
