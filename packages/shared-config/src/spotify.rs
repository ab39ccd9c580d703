//! Catalog API configuration types

use std::fmt;

use crate::{get_env_or_default, get_required_env, ConfigResult};

const DEFAULT_API_URL: &str = "https://api.spotify.com";
const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";

/// Spotify Web API configuration (client-credentials flow)
#[derive(Clone)]
pub struct SpotifyConfig {
    /// Web API base URL
    pub api_url: String,

    /// Accounts service base URL (token endpoint)
    pub accounts_url: String,

    /// OAuth client id
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: String,
}

impl fmt::Debug for SpotifyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpotifyConfig")
            .field("api_url", &self.api_url)
            .field("accounts_url", &self.accounts_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

impl SpotifyConfig {
    /// Load configuration from environment variables
    ///
    /// `SPOTIFY_CLIENT_ID` and `SPOTIFY_CLIENT_SECRET` are required.
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            api_url: get_env_or_default("SPOTIFY_API_URL", DEFAULT_API_URL),
            accounts_url: get_env_or_default("SPOTIFY_ACCOUNTS_URL", DEFAULT_ACCOUNTS_URL),
            client_id: get_required_env("SPOTIFY_CLIENT_ID")?,
            client_secret: get_required_env("SPOTIFY_CLIENT_SECRET")?,
        })
    }

    /// Create a configuration where both the API and accounts service live
    /// at `url` (useful for testing against a single mock server)
    pub fn with_url(
        url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        let url = url.into();
        Self {
            api_url: url.clone(),
            accounts_url: url,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Get the full URL for the token endpoint
    pub fn token_url(&self) -> String {
        format!("{}/api/token", self.accounts_url.trim_end_matches('/'))
    }

    /// Get the full URL for the search endpoint
    pub fn search_url(&self) -> String {
        format!("{}/v1/search", self.api_url.trim_end_matches('/'))
    }
}
