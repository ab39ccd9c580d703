//! Mood-based recommendations
//!
//! Turns a mood and free-text preferences into a list of catalog tracks:
//!
//! 1. [`prompt`] builds the suggestion prompt
//! 2. the model answers with (hopefully) a JSON array of songs
//! 3. [`extract`] recovers the suggestion list from that text
//! 4. [`resolver`] looks each suggestion up in the catalog
//! 5. the resolved tracks are wrapped with a summary message

pub mod extract;
pub mod prompt;
pub mod resolver;

use std::sync::Arc;
use std::time::Duration;

use moodmix_anthropic_client::AnthropicClient;
use moodmix_spotify_client::SpotifyClient;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::error::{ApiError, ApiResult};

pub use extract::{extract_suggestions, ExtractionFailed, RawSuggestion, UnparsedOutput};
pub use prompt::{build_mood_prompt, DEFAULT_PREFERENCES};
pub use resolver::{CatalogResolver, ResolvedTrack, MAX_RESOLVED};

/// Token budget for the suggestion request
pub const MOOD_MAX_TOKENS: u32 = 2000;

/// Decoded `input` of a `mood_recommendations` call
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MoodRequest {
    pub mood: String,
    #[serde(default)]
    pub preferences: Option<String>,
}

impl MoodRequest {
    /// Decode the JSON-encoded tool input
    pub fn parse(input: &str) -> ApiResult<Self> {
        serde_json::from_str(input).map_err(|e| ApiError::MalformedInput(e.to_string()))
    }
}

/// Final output of the mood pipeline
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResult {
    pub mood: String,
    pub tracks: Vec<ResolvedTrack>,
    pub message: String,
}

impl RecommendationResult {
    pub fn new(mood: String, tracks: Vec<ResolvedTrack>) -> Self {
        let message = format!(
            "Here are {} songs perfect for your {} mood!",
            tracks.len(),
            mood
        );
        Self {
            mood,
            tracks,
            message,
        }
    }
}

/// Either a resolved list or the model text that could not be parsed
#[derive(Debug)]
pub enum RecommendationOutcome {
    Resolved(RecommendationResult),
    Unparsed(ExtractionFailed),
}

/// Runs the mood pipeline end to end
#[derive(Clone)]
pub struct RecommendationService {
    anthropic: Arc<AnthropicClient>,
    spotify: Arc<SpotifyClient>,
    resolver: CatalogResolver,
}

impl RecommendationService {
    pub fn new(
        anthropic: Arc<AnthropicClient>,
        spotify: Arc<SpotifyClient>,
        resolver_delay: Duration,
    ) -> Self {
        let resolver = CatalogResolver::new(spotify.clone(), resolver_delay);
        Self {
            anthropic,
            spotify,
            resolver,
        }
    }

    /// Recommend tracks for `request`
    ///
    /// # Errors
    /// - `ApiError::Upstream` if the catalog token cannot be obtained or the
    ///   model call fails
    ///
    /// Unparseable model output is not an error; it comes back as
    /// [`RecommendationOutcome::Unparsed`].
    #[instrument(skip(self, request), fields(mood = %request.mood))]
    pub async fn recommend(&self, request: &MoodRequest) -> ApiResult<RecommendationOutcome> {
        // A missing catalog token fails the whole request up front
        self.spotify.tokens().access_token().await?;

        let prompt = build_mood_prompt(&request.mood, request.preferences.as_deref());
        let text = self.anthropic.complete(&prompt, MOOD_MAX_TOKENS).await?;

        let suggestions = match extract_suggestions(&text) {
            Ok(suggestions) => suggestions,
            Err(failure) => {
                warn!(reason = %failure.reason, "Model output was not a suggestion list");
                return Ok(RecommendationOutcome::Unparsed(failure));
            }
        };

        let tracks = self.resolver.resolve(&suggestions).await;

        info!(
            suggested = suggestions.len(),
            resolved = tracks.len(),
            "Mood recommendations resolved"
        );

        Ok(RecommendationOutcome::Resolved(RecommendationResult::new(
            request.mood.clone(),
            tracks,
        )))
    }
}
