//! Resolving suggestions against the catalog

use std::sync::Arc;
use std::time::Duration;

use moodmix_spotify_client::{CatalogTrack, SpotifyClient};
use serde::Serialize;
use tracing::{debug, warn};

use super::extract::RawSuggestion;

/// Suggestions considered per request; the rest are ignored
pub const MAX_RESOLVED: usize = 10;

/// A catalog track paired with the model's reason for suggesting it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedTrack {
    pub name: String,
    pub artist: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub reason: String,
    pub preview: Option<String>,
}

impl ResolvedTrack {
    fn new(track: CatalogTrack, reason: String) -> Self {
        Self {
            name: track.name,
            artist: track.artist,
            url: track.url,
            image: track.image,
            reason,
            preview: track.preview,
        }
    }
}

/// Looks suggestions up one at a time, keeping the best hit for each.
///
/// A failed or empty lookup drops that suggestion only. Lookups are spaced by
/// a fixed pause to stay clear of catalog rate limits.
#[derive(Clone)]
pub struct CatalogResolver {
    spotify: Arc<SpotifyClient>,
    delay: Duration,
}

impl CatalogResolver {
    pub fn new(spotify: Arc<SpotifyClient>, delay: Duration) -> Self {
        Self { spotify, delay }
    }

    /// Resolve up to [`MAX_RESOLVED`] suggestions, in order
    pub async fn resolve(&self, suggestions: &[RawSuggestion]) -> Vec<ResolvedTrack> {
        let mut tracks = Vec::with_capacity(suggestions.len().min(MAX_RESOLVED));

        for (index, suggestion) in suggestions.iter().take(MAX_RESOLVED).enumerate() {
            if index > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            match self
                .spotify
                .search_tracks(&suggestion.search_query(), 1)
                .await
            {
                Ok(found) => match found.into_iter().next() {
                    Some(track) => {
                        tracks.push(ResolvedTrack::new(track, suggestion.reason.clone()))
                    }
                    None => debug!(
                        title = %suggestion.song_title,
                        artist = %suggestion.artist_name,
                        "No catalog match, skipping suggestion"
                    ),
                },
                Err(e) => warn!(
                    title = %suggestion.song_title,
                    error = %e,
                    "Catalog search failed, skipping suggestion"
                ),
            }
        }

        tracks
    }
}
