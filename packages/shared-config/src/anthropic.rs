//! Model chat API configuration types

use std::fmt;

use crate::{get_env_or_default, get_required_env, ConfigResult};

/// Default API base URL
const DEFAULT_URL: &str = "https://api.anthropic.com";

/// Default model used for both chat passthrough and recommendations
const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";

/// Anthropic Messages API configuration
#[derive(Clone)]
pub struct AnthropicConfig {
    /// API base URL
    pub url: String,

    /// API key sent in the `x-api-key` header
    pub api_key: String,

    /// Model identifier
    pub model: String,
}

impl fmt::Debug for AnthropicConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnthropicConfig")
            .field("url", &self.url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

impl AnthropicConfig {
    /// Load configuration from environment variables
    ///
    /// `ANTHROPIC_API_KEY` is required.
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            url: get_env_or_default("ANTHROPIC_API_URL", DEFAULT_URL),
            api_key: get_required_env("ANTHROPIC_API_KEY")?,
            model: get_env_or_default("ANTHROPIC_MODEL", DEFAULT_MODEL),
        })
    }

    /// Create a configuration with a custom URL (useful for testing)
    pub fn with_url(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Get the full URL for the messages endpoint
    pub fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.url.trim_end_matches('/'))
    }
}
