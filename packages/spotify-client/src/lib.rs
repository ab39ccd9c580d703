//! Spotify Web API client for MoodMix
//!
//! This crate provides:
//! - [`TokenProvider`]: client-credentials token acquisition with an
//!   expiry-aware cache
//! - [`SpotifyClient`]: bounded track search mapped to [`CatalogTrack`]
//!
//! # Example
//!
//! ```rust,no_run
//! use moodmix_shared_config::SpotifyConfig;
//! use moodmix_spotify_client::SpotifyClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SpotifyClient::new(&SpotifyConfig::from_env()?, None)?;
//!
//! for track in client.search_tracks("Bohemian Rhapsody", 5).await? {
//!     println!("{} - {} ({})", track.artist, track.name, track.url);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Environment Variables
//!
//! - `SPOTIFY_CLIENT_ID`: OAuth client id (required)
//! - `SPOTIFY_CLIENT_SECRET`: OAuth client secret (required)

mod auth;
mod client;
mod error;
mod models;

pub use auth::{AccessToken, TokenProvider};
pub use client::{SpotifyClient, MAX_SEARCH_LIMIT};
pub use error::{SpotifyError, SpotifyResult};
pub use models::CatalogTrack;
