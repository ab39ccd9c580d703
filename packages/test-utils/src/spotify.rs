//! Mock Spotify accounts service and Web API
//!
//! Provides a [`MockSpotifyServer`] serving both the client-credentials token
//! endpoint and track search from one address, matching
//! `SpotifyConfig::with_url`.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Token handed out by [`MockSpotifyServer::mock_token`]
pub const MOCK_ACCESS_TOKEN: &str = "mock-spotify-token";

/// Catalog track fixture rendered in Web API shape
#[derive(Debug, Clone)]
pub struct SpotifyTrackFixture {
    pub name: String,
    pub artists: Vec<String>,
    pub url: String,
    pub images: Vec<Option<String>>,
    pub preview_url: Option<String>,
}

impl SpotifyTrackFixture {
    /// Track with one artist, one album image, and no preview
    pub fn new(name: &str, artist: &str) -> Self {
        let slug: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        Self {
            name: name.to_string(),
            artists: vec![artist.to_string()],
            url: format!("https://open.spotify.com/track/{}", slug),
            images: vec![Some(format!("https://i.scdn.co/image/{}", slug))],
            preview_url: None,
        }
    }

    /// Add another credited artist
    pub fn with_artist(mut self, artist: &str) -> Self {
        self.artists.push(artist.to_string());
        self
    }

    /// Replace the album images
    pub fn with_images(mut self, images: Vec<Option<&str>>) -> Self {
        self.images = images.into_iter().map(|i| i.map(str::to_string)).collect();
        self
    }

    /// Set the preview URL
    pub fn with_preview(mut self, preview_url: &str) -> Self {
        self.preview_url = Some(preview_url.to_string());
        self
    }

    /// Render as a Web API track object
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "name": self.name,
            "artists": self.artists.iter().map(|a| json!({"name": a})).collect::<Vec<_>>(),
            "external_urls": {"spotify": self.url},
            "album": {
                "images": self.images.iter().map(|url| json!({"url": url})).collect::<Vec<_>>()
            },
            "preview_url": self.preview_url,
        })
    }
}

/// Mock Spotify server
pub struct MockSpotifyServer {
    server: MockServer,
}

impl MockSpotifyServer {
    /// Start a new mock server
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Get the server URL (use for both API and accounts base URLs)
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Mount a successful client-credentials token response
    pub async fn mock_token(&self) {
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": MOCK_ACCESS_TOKEN,
                "token_type": "Bearer",
                "expires_in": 3600
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a token endpoint failure in accounts-service shape
    pub async fn mock_token_failure(&self, status_code: u16, error: &str) {
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(ResponseTemplate::new(status_code).set_body_json(json!({
                "error": error,
                "error_description": "Invalid client"
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a search response for exactly `query`
    pub async fn mock_search(&self, query: &str, tracks: Vec<SpotifyTrackFixture>) {
        let items: Vec<serde_json::Value> = tracks.iter().map(|t| t.to_json()).collect();

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("q", query))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tracks": {"items": items, "total": items.len()}
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a zero-result search for exactly `query`
    pub async fn mock_search_empty(&self, query: &str) {
        self.mock_search(query, Vec::new()).await;
    }

    /// Mount a Web API error for exactly `query`
    pub async fn mock_search_failure(&self, query: &str, status_code: u16, message: &str) {
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("q", query))
            .respond_with(ResponseTemplate::new(status_code).set_body_json(json!({
                "error": {"status": status_code, "message": message}
            })))
            .mount(&self.server)
            .await;
    }

    /// Answer any search not matched by a query-specific mock with one track
    /// named after the query
    pub async fn mock_search_fallback(&self) {
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(|request: &wiremock::Request| {
                let query = request
                    .url
                    .query_pairs()
                    .find(|(k, _)| k == "q")
                    .map(|(_, v)| v.into_owned())
                    .unwrap_or_default();
                let track = SpotifyTrackFixture::new(&query, "Fallback Artist");
                ResponseTemplate::new(200).set_body_json(json!({
                    "tracks": {"items": [track.to_json()], "total": 1}
                }))
            })
            .with_priority(10)
            .mount(&self.server)
            .await;
    }

    /// Number of requests received on the search endpoint
    pub async fn search_calls(&self) -> usize {
        self.received_on("/v1/search").await
    }

    /// Number of requests received on the token endpoint
    pub async fn token_calls(&self) -> usize {
        self.received_on("/api/token").await
    }

    /// Query strings of search requests, in arrival order
    pub async fn search_queries(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == "/v1/search")
            .filter_map(|r| {
                r.url
                    .query_pairs()
                    .find(|(k, _)| k == "q")
                    .map(|(_, v)| v.into_owned())
            })
            .collect()
    }

    async fn received_on(&self, endpoint: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == endpoint)
            .count()
    }

    /// Get reference to the underlying mock server for custom mock setups
    pub fn inner(&self) -> &MockServer {
        &self.server
    }
}
