//! Spotify API response models

use serde::{Deserialize, Serialize};

/// A catalog track reduced to the fields MoodMix returns to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogTrack {
    /// Track title
    pub name: String,
    /// Artist names joined with ", " in catalog order
    pub artist: String,
    /// Public Spotify URL
    pub url: String,
    /// Album art URL (first or second album image)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// 30 second preview URL, `null` when Spotify has none
    #[serde(default)]
    pub preview: Option<String>,
}

// Internal response types for deserialization

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    #[allow(dead_code)] // Always "Bearer" for client credentials
    pub token_type: Option<String>,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub tracks: TracksPage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TracksPage {
    #[serde(default)]
    pub items: Vec<Option<RawTrack>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTrack {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<RawArtist>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub album: Option<RawAlbum>,
    #[serde(default)]
    pub preview_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawArtist {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawAlbum {
    #[serde(default)]
    pub images: Vec<RawImage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawImage {
    #[serde(default)]
    pub url: Option<String>,
}

impl From<RawTrack> for CatalogTrack {
    fn from(raw: RawTrack) -> Self {
        let image = raw.album.and_then(|album| {
            let mut urls = album.images.into_iter().take(2).map(|image| image.url);
            urls.next().flatten().or_else(|| urls.next().flatten())
        });

        Self {
            name: raw.name,
            artist: raw
                .artists
                .into_iter()
                .map(|a| a.name)
                .collect::<Vec<_>>()
                .join(", "),
            url: raw.external_urls.spotify.unwrap_or_default(),
            image,
            preview: raw.preview_url,
        }
    }
}
