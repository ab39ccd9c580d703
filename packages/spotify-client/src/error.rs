//! Spotify API error types

use thiserror::Error;

/// Spotify API client errors
#[derive(Error, Debug)]
pub enum SpotifyError {
    /// Client id or secret is missing
    #[error("client id and secret are required for Spotify API access")]
    MissingCredentials,

    /// Invalid input provided to API method
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("Failed to parse Spotify response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Spotify returned a non-success status
    #[error("Spotify API error {status}: {message}")]
    Api {
        status: u16,
        message: String,
        /// Parsed error body, when the body was JSON
        body: Option<serde_json::Value>,
    },

    /// Rate limited by Spotify
    #[error("Rate limited by Spotify API")]
    RateLimited {
        retry_after: Option<u64>,
        message: Option<String>,
        body: Option<serde_json::Value>,
    },
}

impl SpotifyError {
    /// Best-effort human readable message for callers that surface upstream
    /// failures
    pub fn upstream_message(&self) -> String {
        match self {
            Self::Api { message, .. }
            | Self::RateLimited {
                message: Some(message),
                ..
            } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Raw upstream error body, if any
    pub fn upstream_body(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Api { body, .. } | Self::RateLimited { body, .. } => body.as_ref(),
            _ => None,
        }
    }
}

/// Pull a message out of a Spotify error body.
///
/// Web API errors look like `{"error": {"status": 401, "message": "..."}}`,
/// while the accounts service answers `{"error": "invalid_client", ...}`.
pub(crate) fn message_from_body(body: &serde_json::Value) -> Option<String> {
    let error = body.get("error")?;
    error
        .get("message")
        .and_then(|m| m.as_str())
        .or_else(|| error.as_str())
        .map(str::to_string)
}

/// Build an error from a non-success response
pub(crate) async fn from_response(response: reqwest::Response) -> SpotifyError {
    let status = response.status();
    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok());

    let text = response.text().await.unwrap_or_default();
    let body = serde_json::from_str::<serde_json::Value>(&text).ok();
    let message = body.as_ref().and_then(message_from_body);

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return SpotifyError::RateLimited {
            retry_after,
            message,
            body,
        };
    }

    let message = message.unwrap_or_else(|| format!("Status {}", status));
    SpotifyError::Api {
        status: status.as_u16(),
        message,
        body,
    }
}

/// Result type for Spotify operations
pub type SpotifyResult<T> = Result<T, SpotifyError>;
