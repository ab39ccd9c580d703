//! Core Messages API HTTP client

use std::time::Duration;

use moodmix_shared_config::AnthropicConfig;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::error::{message_from_body, AnthropicError, AnthropicResult};
use crate::models::{Message, MessagesRequest, MessagesResponse};

/// Messages API version sent with every request
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Longest non-JSON error body quoted in an error message
const MAX_QUOTED_BODY_CHARS: usize = 500;

/// Quote a plain-text error body, cut to a bounded number of characters
fn quote_body(text: &str) -> String {
    match text.char_indices().nth(MAX_QUOTED_BODY_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Anthropic Messages API client
#[derive(Clone)]
pub struct AnthropicClient {
    /// HTTP client with connection pool
    http_client: Client,
    /// Configuration
    config: AnthropicConfig,
}

impl std::fmt::Debug for AnthropicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicClient")
            .field("config", &self.config)
            .finish()
    }
}

impl AnthropicClient {
    /// Create a new client from configuration
    ///
    /// `timeout_secs` bounds each request; `None` leaves reqwest's default
    /// (no overall timeout).
    pub fn new(config: &AnthropicConfig, timeout_secs: Option<u64>) -> AnthropicResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AnthropicError::MissingApiKey);
        }

        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60));
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build().map_err(AnthropicError::HttpError)?;

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    /// Send a conversation and return the full response
    #[instrument(skip(self, messages), fields(model = %self.config.model, message_count = messages.len()))]
    pub async fn messages(
        &self,
        messages: Vec<Message>,
        max_tokens: u32,
    ) -> AnthropicResult<MessagesResponse> {
        let request = MessagesRequest {
            model: self.config.model.clone(),
            max_tokens,
            messages,
            system: None,
        };

        let response = self
            .http_client
            .post(self.config.messages_url())
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = serde_json::from_str::<serde_json::Value>(&text).ok();
            let message = body
                .as_ref()
                .and_then(message_from_body)
                .unwrap_or_else(|| format!("Status {}: {}", status, quote_body(&text)));

            return Err(AnthropicError::ApiError {
                status: status.as_u16(),
                message,
                body,
            });
        }

        let messages_response: MessagesResponse = response.json().await?;

        debug!(
            stop_reason = ?messages_response.stop_reason,
            blocks = messages_response.content.len(),
            "Messages response received"
        );

        Ok(messages_response)
    }

    /// Send a single user prompt and return the text of the reply
    ///
    /// # Errors
    /// - `AnthropicError::ApiError` if the API returns a non-success status
    /// - `AnthropicError::InvalidResponse` if the reply has no text block
    /// - `AnthropicError::HttpError` if the request could not be sent
    pub async fn complete(&self, prompt: &str, max_tokens: u32) -> AnthropicResult<String> {
        debug!(prompt_len = prompt.len(), max_tokens, "Sending prompt");

        let response = self.messages(vec![Message::user(prompt)], max_tokens).await?;

        response
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| AnthropicError::InvalidResponse("response has no text content".into()))
    }
}
