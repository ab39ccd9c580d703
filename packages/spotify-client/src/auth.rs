//! Client-credentials token acquisition and caching

use std::fmt;
use std::time::{Duration, Instant};

use moodmix_shared_config::SpotifyConfig;
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::error::{self, SpotifyError, SpotifyResult};
use crate::models::TokenResponse;

/// Tokens are treated as expired this long before Spotify says they are
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// A bearer token and the instant it stops being usable
#[derive(Clone)]
pub struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    fn new(value: String, expires_in: Duration, now: Instant) -> Self {
        Self {
            value,
            expires_at: now + expires_in,
        }
    }

    /// The bearer token
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the token can still be used at `now`
    pub fn is_fresh_at(&self, now: Instant) -> bool {
        now + EXPIRY_MARGIN < self.expires_at
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Owns the catalog bearer token.
///
/// The cache starts empty, is filled on first use, and is refilled once the
/// cached token is within [`EXPIRY_MARGIN`] of expiry. The lock is held
/// across the fetch so concurrent callers share a single token request.
pub struct TokenProvider {
    http_client: Client,
    config: SpotifyConfig,
    cached: Mutex<Option<AccessToken>>,
}

impl fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenProvider")
            .field("config", &self.config)
            .finish()
    }
}

impl TokenProvider {
    /// Create a provider using `http_client` for token requests
    ///
    /// # Errors
    /// Returns `SpotifyError::MissingCredentials` if the id or secret is empty
    pub fn new(config: &SpotifyConfig, http_client: Client) -> SpotifyResult<Self> {
        if config.client_id.trim().is_empty() || config.client_secret.trim().is_empty() {
            return Err(SpotifyError::MissingCredentials);
        }

        Ok(Self {
            http_client,
            config: config.clone(),
            cached: Mutex::new(None),
        })
    }

    /// Return a usable bearer token, fetching one if the cache is empty or
    /// stale
    pub async fn access_token(&self) -> SpotifyResult<String> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.is_fresh_at(Instant::now()) {
                return Ok(token.value().to_string());
            }
            debug!("Cached Spotify token is stale, refreshing");
        }

        let token = self.fetch().await?;
        let value = token.value().to_string();
        *cached = Some(token);
        Ok(value)
    }

    /// Drop the cached token so the next call fetches a new one
    pub async fn invalidate(&self) {
        self.cached.lock().await.take();
    }

    #[instrument(skip(self))]
    async fn fetch(&self) -> SpotifyResult<AccessToken> {
        let response = self
            .http_client
            .post(self.config.token_url())
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error::from_response(response).await);
        }

        let token: TokenResponse = response.json().await?;
        info!(expires_in = token.expires_in, "Fetched Spotify access token");

        Ok(AccessToken::new(
            token.access_token,
            Duration::from_secs(token.expires_in),
            Instant::now(),
        ))
    }
}
