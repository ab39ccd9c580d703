//! Shared test utilities for MoodMix workspace
//!
//! This crate provides mock implementations of the two upstream APIs so the
//! client crates and the API server can be tested without network access.
//!
//! # Mock Services
//!
//! - [`MockAnthropicServer`] - Mock Messages API for chat and suggestion tests
//! - [`MockSpotifyServer`] - Mock accounts + Web API for token and search tests
//!
//! # Example
//!
//! ```rust,ignore
//! use moodmix_test_utils::{MockAnthropicServer, MockSpotifyServer, SpotifyTrackFixture};
//!
//! #[tokio::test]
//! async fn test_with_mocks() {
//!     let anthropic = MockAnthropicServer::start().await;
//!     anthropic.mock_text_response("Hello!").await;
//!
//!     let spotify = MockSpotifyServer::start().await;
//!     spotify.mock_token().await;
//!     spotify
//!         .mock_search("Bohemian Rhapsody", vec![SpotifyTrackFixture::new("Bohemian Rhapsody", "Queen")])
//!         .await;
//! }
//! ```

mod anthropic;
mod spotify;

pub use anthropic::{suggestion_array, MockAnthropicServer};
pub use spotify::{MockSpotifyServer, SpotifyTrackFixture, MOCK_ACCESS_TOKEN};
