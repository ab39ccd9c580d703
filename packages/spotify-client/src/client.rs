//! Spotify search client implementation

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use moodmix_shared_config::SpotifyConfig;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::auth::TokenProvider;
use crate::error::{self, SpotifyError, SpotifyResult};
use crate::models::{CatalogTrack, SearchResponse};

/// Largest page the search endpoint accepts
pub const MAX_SEARCH_LIMIT: u32 = 50;

/// Spotify Web API client
///
/// Cheap to clone; clones share the HTTP pool and the token cache.
#[derive(Clone)]
pub struct SpotifyClient {
    http_client: Client,
    config: SpotifyConfig,
    tokens: Arc<TokenProvider>,
}

impl fmt::Debug for SpotifyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpotifyClient")
            .field("config", &self.config)
            .finish()
    }
}

impl SpotifyClient {
    /// Create a client with its own token provider
    ///
    /// # Errors
    /// - `SpotifyError::MissingCredentials` if the id or secret is empty
    /// - `SpotifyError::Http` if the HTTP client cannot be built
    pub fn new(config: &SpotifyConfig, timeout_secs: Option<u64>) -> SpotifyResult<Self> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .pool_max_idle_per_host(5)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent("MoodMix/1.0");
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build()?;

        let tokens = Arc::new(TokenProvider::new(config, http_client.clone())?);
        Ok(Self::with_token_provider(config, http_client, tokens))
    }

    /// Create a client around an existing token provider
    pub fn with_token_provider(
        config: &SpotifyConfig,
        http_client: Client,
        tokens: Arc<TokenProvider>,
    ) -> Self {
        Self {
            http_client,
            config: config.clone(),
            tokens,
        }
    }

    /// The token provider backing this client
    pub fn tokens(&self) -> &Arc<TokenProvider> {
        &self.tokens
    }

    /// Validate search query input
    fn validate_query(query: &str) -> SpotifyResult<&str> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(SpotifyError::InvalidInput(
                "search query cannot be empty".to_string(),
            ));
        }
        Ok(trimmed)
    }

    /// Search the catalog for tracks
    ///
    /// # Arguments
    /// * `query` - Free-text search query
    /// * `limit` - Maximum number of tracks (clamped to 1..=50)
    ///
    /// # Errors
    /// - `SpotifyError::InvalidInput` - If the query is empty
    /// - `SpotifyError::Api` - If Spotify or the token endpoint returns an error
    /// - `SpotifyError::RateLimited` - If Spotify answers 429
    /// - `SpotifyError::Http` - If the HTTP request fails
    #[instrument(skip(self))]
    pub async fn search_tracks(&self, query: &str, limit: u32) -> SpotifyResult<Vec<CatalogTrack>> {
        let query = Self::validate_query(query)?;
        let limit = limit.clamp(1, MAX_SEARCH_LIMIT).to_string();
        let token = self.tokens.access_token().await?;

        let response = self
            .http_client
            .get(self.config.search_url())
            .bearer_auth(token)
            .query(&[("q", query), ("type", "track"), ("limit", limit.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error::from_response(response).await);
        }

        let text = response.text().await?;
        let search: SearchResponse = serde_json::from_str(&text)?;

        let tracks: Vec<CatalogTrack> = search
            .tracks
            .items
            .into_iter()
            .flatten()
            .map(Into::into)
            .collect();

        debug!(query = %query, result_count = tracks.len(), "Spotify search complete");

        Ok(tracks)
    }
}
