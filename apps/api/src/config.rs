//! API server configuration

use anyhow::{Context, Result};
use moodmix_shared_config::{parse_env, AnthropicConfig, CommonConfig, Environment, SpotifyConfig};

/// Default listening port
const DEFAULT_PORT: u16 = 3000;

/// Default pause between catalog lookups, in milliseconds
const DEFAULT_RESOLVER_DELAY_MS: u64 = 100;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream credentials and settings shared with the client crates
    pub common: CommonConfig,

    /// Server port (default: 3000)
    pub port: u16,

    /// Pause between consecutive catalog lookups in the mood pipeline
    pub resolver_delay_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Requires `ANTHROPIC_API_KEY`, `SPOTIFY_CLIENT_ID` and
    /// `SPOTIFY_CLIENT_SECRET`; everything else has a default.
    pub fn from_env() -> Result<Self> {
        let common = CommonConfig::from_env().context("Failed to load config")?;

        Ok(Self {
            common,
            port: parse_env("PORT", DEFAULT_PORT).context("Invalid PORT value")?,
            resolver_delay_ms: parse_env("RESOLVER_DELAY_MS", DEFAULT_RESOLVER_DELAY_MS)
                .context("Invalid RESOLVER_DELAY_MS value")?,
        })
    }

    /// Get model chat API configuration
    pub fn anthropic(&self) -> &AnthropicConfig {
        &self.common.anthropic
    }

    /// Get catalog API configuration
    pub fn spotify(&self) -> &SpotifyConfig {
        &self.common.spotify
    }

    /// Get environment mode
    pub fn environment(&self) -> Environment {
        self.common.environment
    }
}
