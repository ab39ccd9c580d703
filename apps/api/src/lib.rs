//! MoodMix API library
//!
//! Exposes the router and its building blocks so `main` and the integration
//! tests assemble the exact same application.

pub mod config;
pub mod error;
pub mod routes;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderName, Method},
    Router,
};
use moodmix_anthropic_client::AnthropicClient;
use moodmix_spotify_client::SpotifyClient;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::Config;
pub use error::{ApiError, ApiResult, ErrorResponse};

use routes::{invoke_router, status_router, InvokeState};
use services::{Dispatcher, RecommendationService};

/// Build the CORS layer
///
/// Any origin may call the API. Preflight `OPTIONS` requests are answered
/// with 200 and an empty body.
pub fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
}

/// Create both upstream clients and the dispatcher that drives them
pub fn build_dispatcher(config: &Config) -> Result<Dispatcher> {
    let timeout = config.common.upstream_timeout_secs;

    let anthropic = Arc::new(
        AnthropicClient::new(config.anthropic(), timeout)
            .context("Failed to create Anthropic client")?,
    );
    let spotify = Arc::new(
        SpotifyClient::new(config.spotify(), timeout).context("Failed to create Spotify client")?,
    );

    let recommendations = RecommendationService::new(
        anthropic.clone(),
        spotify.clone(),
        Duration::from_millis(config.resolver_delay_ms),
    );

    Ok(Dispatcher::new(anthropic, spotify, recommendations))
}

/// Build the full application router from configuration
pub fn build_app(config: &Config) -> Result<Router> {
    let dispatcher = build_dispatcher(config)?;
    let invoke_state = InvokeState::new(dispatcher, config.environment());

    Ok(Router::new()
        .merge(status_router())
        .merge(invoke_router(invoke_state))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer()))
}
