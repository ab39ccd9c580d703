//! Tool selection and execution for `POST /invoke`

use std::str::FromStr;
use std::sync::Arc;

use moodmix_anthropic_client::AnthropicClient;
use moodmix_spotify_client::SpotifyClient;
use serde_json::Value;
use tracing::{info, instrument};

use crate::error::{ApiError, ApiResult};
use crate::services::recommendations::{MoodRequest, RecommendationOutcome, RecommendationService};

/// Token budget for the chat passthrough
pub const CHAT_MAX_TOKENS: u32 = 300;

/// Tracks returned by the search tool
pub const SEARCH_LIMIT: u32 = 5;

/// The operations selectable through the invoke endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    ClaudeChat,
    SpotifySearch,
    MoodRecommendations,
}

impl Tool {
    /// Wire name of the tool
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClaudeChat => "claude_chat",
            Self::SpotifySearch => "spotify_search",
            Self::MoodRecommendations => "mood_recommendations",
        }
    }
}

impl FromStr for Tool {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "claude_chat" => Ok(Self::ClaudeChat),
            "spotify_search" => Ok(Self::SpotifySearch),
            "mood_recommendations" => Ok(Self::MoodRecommendations),
            other => Err(ApiError::UnknownTool(other.to_string())),
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs tools against the two upstream clients
#[derive(Clone)]
pub struct Dispatcher {
    anthropic: Arc<AnthropicClient>,
    spotify: Arc<SpotifyClient>,
    recommendations: RecommendationService,
}

impl Dispatcher {
    pub fn new(
        anthropic: Arc<AnthropicClient>,
        spotify: Arc<SpotifyClient>,
        recommendations: RecommendationService,
    ) -> Self {
        Self {
            anthropic,
            spotify,
            recommendations,
        }
    }

    /// Execute `tool` with its raw string `input`, producing the `output`
    /// value of the response
    #[instrument(skip(self, input), fields(tool = %tool))]
    pub async fn invoke(&self, tool: Tool, input: &str) -> ApiResult<Value> {
        info!("Invoking tool");

        match tool {
            Tool::ClaudeChat => {
                let reply = self.anthropic.complete(input, CHAT_MAX_TOKENS).await?;
                Ok(Value::String(reply))
            }
            Tool::SpotifySearch => {
                let tracks = self.spotify.search_tracks(input, SEARCH_LIMIT).await?;
                to_value(&tracks)
            }
            Tool::MoodRecommendations => {
                let request = MoodRequest::parse(input)?;
                match self.recommendations.recommend(&request).await? {
                    RecommendationOutcome::Resolved(result) => to_value(&result),
                    RecommendationOutcome::Unparsed(failure) => to_value(&failure.into_output()),
                }
            }
        }
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> ApiResult<Value> {
    serde_json::to_value(value).map_err(|e| ApiError::Internal(e.to_string()))
}
