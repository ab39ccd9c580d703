//! Integration tests for the invoke endpoint
//!
//! Drives the real router against mock model and catalog servers.

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use moodmix_api::build_app;
use moodmix_shared_config::Environment;
use moodmix_test_utils::{MockAnthropicServer, MockSpotifyServer, SpotifyTrackFixture};
use rstest::rstest;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use common::*;

struct TestContext {
    anthropic: MockAnthropicServer,
    spotify: MockSpotifyServer,
}

impl TestContext {
    async fn new() -> Self {
        Self {
            anthropic: MockAnthropicServer::start().await,
            spotify: MockSpotifyServer::start().await,
        }
    }

    fn app(&self) -> Router {
        self.app_in(Environment::Development)
    }

    fn app_in(&self, environment: Environment) -> Router {
        let config = test_config(&self.anthropic.url(), &self.spotify.url(), environment);
        build_app(&config).unwrap()
    }
}

// ========== Dispatch ==========

#[rstest]
#[case::plain_text("hello")]
#[case::json_input(r#"{"mood": "Happy"}"#)]
#[case::empty("")]
#[tokio::test]
async fn test_unknown_tool_is_rejected(#[case] input: &str) {
    let ctx = TestContext::new().await;

    let (status, body) = invoke(ctx.app(), "unknown_tool", input).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown tool");
    assert_eq!(ctx.anthropic.message_calls().await, 0);
    assert_eq!(ctx.spotify.search_calls().await, 0);
}

#[tokio::test]
async fn test_missing_tool_is_unknown() {
    let ctx = TestContext::new().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/invoke")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"input": "hi"}"#))
        .unwrap();

    let (status, body) = send(ctx.app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown tool");
}

#[tokio::test]
async fn test_non_json_body_is_bad_request() {
    let ctx = TestContext::new().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/invoke")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("not json"))
        .unwrap();

    let (status, body) = send(ctx.app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request body");
}

// ========== claude_chat ==========

#[tokio::test]
async fn test_claude_chat_passthrough() {
    let ctx = TestContext::new().await;
    ctx.anthropic
        .mock_text_response("Try some Nina Simone tonight.")
        .await;

    let (status, body) = invoke(ctx.app(), "claude_chat", "Something for a rainy evening?").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["output"], "Try some Nina Simone tonight.");

    let sent = ctx.anthropic.last_request_body().await.unwrap();
    assert_eq!(sent["max_tokens"], 300);
    assert_eq!(sent["model"], "claude-3-haiku-20240307");
    assert_eq!(sent["messages"][0]["role"], "user");
    assert_eq!(sent["messages"][0]["content"], "Something for a rainy evening?");
}

#[tokio::test]
async fn test_claude_chat_upstream_failure_in_development() {
    let ctx = TestContext::new().await;
    ctx.anthropic.mock_failure(401, "invalid x-api-key").await;

    let (status, body) = invoke(ctx.app(), "claude_chat", "hi").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Invocation failed");
    assert_eq!(body["details"], "invalid x-api-key");
    assert_eq!(body["fullError"]["error"]["message"], "invalid x-api-key");
}

#[tokio::test]
async fn test_claude_chat_upstream_failure_in_production_hides_body() {
    let ctx = TestContext::new().await;
    ctx.anthropic.mock_failure(503, "Overloaded").await;

    let (status, body) = invoke(ctx.app_in(Environment::Production), "claude_chat", "hi").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["details"], "Overloaded");
    assert!(body.get("fullError").is_none());
}

// ========== spotify_search ==========

#[tokio::test]
async fn test_spotify_search_returns_at_most_five_tracks() {
    let ctx = TestContext::new().await;
    ctx.spotify.mock_token().await;
    ctx.spotify
        .mock_search(
            "Bohemian Rhapsody",
            vec![
                SpotifyTrackFixture::new("Bohemian Rhapsody", "Queen")
                    .with_preview("https://p.scdn.co/bohemian"),
                SpotifyTrackFixture::new("Bohemian Rhapsody - Live", "Queen"),
                SpotifyTrackFixture::new("Bohemian Rhapsody", "The Muppets").with_images(vec![]),
            ],
        )
        .await;

    let (status, body) = invoke(ctx.app(), "spotify_search", "Bohemian Rhapsody").await;

    assert_eq!(status, StatusCode::OK);
    let tracks = body["output"].as_array().unwrap();
    assert!(tracks.len() <= 5);
    assert_eq!(tracks.len(), 3);
    assert_eq!(tracks[0]["name"], "Bohemian Rhapsody");
    assert_eq!(tracks[0]["artist"], "Queen");
    assert!(tracks[0]["url"].as_str().unwrap().starts_with("https://open.spotify.com/"));
    assert_eq!(tracks[0]["preview"], "https://p.scdn.co/bohemian");
    assert!(tracks[1]["preview"].is_null());
    assert!(tracks[2].get("image").is_none());

    let requests = ctx.spotify.inner().received_requests().await.unwrap();
    let search = requests
        .iter()
        .find(|r| r.url.path() == "/v1/search")
        .unwrap();
    let limit = search
        .url
        .query_pairs()
        .find(|(k, _)| k == "limit")
        .map(|(_, v)| v.into_owned());
    assert_eq!(limit.as_deref(), Some("5"));
}

#[tokio::test]
async fn test_spotify_search_upstream_failure() {
    let ctx = TestContext::new().await;
    ctx.spotify.mock_token().await;
    ctx.spotify
        .mock_search_failure("anything", 503, "Service unavailable")
        .await;

    let (status, body) = invoke(ctx.app(), "spotify_search", "anything").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["details"], "Service unavailable");
    assert_eq!(body["fullError"]["error"]["status"], 503);
}

#[tokio::test]
async fn test_spotify_search_rate_limited_reports_upstream_message() {
    let ctx = TestContext::new().await;
    ctx.spotify.mock_token().await;
    ctx.spotify
        .mock_search_failure("anything", 429, "API rate limit exceeded")
        .await;

    let (status, body) = invoke(ctx.app(), "spotify_search", "anything").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["details"], "API rate limit exceeded");
    assert_eq!(body["fullError"]["error"]["status"], 429);
}

// ========== mood_recommendations ==========

#[tokio::test]
async fn test_mood_recommendations_end_to_end() {
    let ctx = TestContext::new().await;
    ctx.anthropic.mock_suggestions(&HAPPY_SUGGESTIONS).await;
    ctx.spotify.mock_token().await;
    ctx.spotify.mock_search_fallback().await;

    let (status, body) = invoke(
        ctx.app(),
        "mood_recommendations",
        &mood_input("Happy", Some("Upbeat pop and funk")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let output = &body["output"];
    assert_eq!(output["mood"], "Happy");
    assert_eq!(output["message"], "Here are 10 songs perfect for your Happy mood!");

    let tracks = output["tracks"].as_array().unwrap();
    assert_eq!(tracks.len(), 10);
    for (track, (title, artist, reason)) in tracks.iter().zip(HAPPY_SUGGESTIONS.iter()) {
        assert_eq!(track["name"], format!("{} {}", title, artist));
        assert_eq!(track["reason"], *reason);
        assert!(track.get("image").is_some());
        assert!(track["preview"].is_null());
    }

    let sent = ctx.anthropic.last_request_body().await.unwrap();
    assert_eq!(sent["max_tokens"], 2000);
    let prompt = sent["messages"][0]["content"].as_str().unwrap();
    assert!(prompt.contains("User's mood: \"Happy\""));
    assert!(prompt.contains("User's music preferences: Upbeat pop and funk"));

    assert_eq!(ctx.spotify.token_calls().await, 1);
    assert_eq!(ctx.spotify.search_calls().await, 10);
}

#[tokio::test]
async fn test_mood_recommendations_cap_at_ten() {
    let ctx = TestContext::new().await;
    let mut suggestions = HAPPY_SUGGESTIONS.to_vec();
    suggestions.push(("Hey Ya!", "OutKast", "Extra"));
    suggestions.push(("Valerie", "Amy Winehouse", "Extra"));
    ctx.anthropic.mock_suggestions(&suggestions).await;
    ctx.spotify.mock_token().await;
    ctx.spotify.mock_search_fallback().await;

    let (status, body) =
        invoke(ctx.app(), "mood_recommendations", &mood_input("Happy", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["output"]["tracks"].as_array().unwrap().len(), 10);
    assert_eq!(ctx.spotify.search_queries().await.len(), 10);
    assert!(!ctx
        .spotify
        .search_queries()
        .await
        .contains(&"Hey Ya! OutKast".to_string()));
}

#[tokio::test]
async fn test_mood_recommendations_skip_misses_and_failures() {
    let ctx = TestContext::new().await;
    ctx.anthropic.mock_suggestions(&HAPPY_SUGGESTIONS).await;
    ctx.spotify.mock_token().await;
    ctx.spotify
        .mock_search_empty("Happy Pharrell Williams")
        .await;
    ctx.spotify
        .mock_search_failure("Dancing Queen ABBA", 500, "Internal error")
        .await;
    ctx.spotify.mock_search_fallback().await;

    let (status, body) =
        invoke(ctx.app(), "mood_recommendations", &mood_input("Happy", None)).await;

    assert_eq!(status, StatusCode::OK);
    let tracks = body["output"]["tracks"].as_array().unwrap();
    assert_eq!(tracks.len(), 8);
    assert_eq!(body["output"]["message"], "Here are 8 songs perfect for your Happy mood!");

    let names: Vec<&str> = tracks.iter().filter_map(|t| t["name"].as_str()).collect();
    assert!(!names.contains(&"Happy Pharrell Williams"));
    assert!(!names.contains(&"Dancing Queen ABBA"));
    assert_eq!(names.last(), Some(&"Can't Stop the Feeling! Justin Timberlake"));
    assert_eq!(ctx.spotify.search_calls().await, 10);
}

#[tokio::test]
async fn test_mood_recommendations_embedded_array() {
    let ctx = TestContext::new().await;
    ctx.anthropic
        .mock_text_response(
            "Sure! Here's your playlist:\n```json\n[{\"songTitle\": \"Heroes\", \"artistName\": \"David Bowie\", \"reason\": \"Soaring\"}]\n```",
        )
        .await;
    ctx.spotify.mock_token().await;
    ctx.spotify
        .mock_search("Heroes David Bowie", vec![SpotifyTrackFixture::new("Heroes", "David Bowie")])
        .await;

    let (status, body) =
        invoke(ctx.app(), "mood_recommendations", &mood_input("Brave", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["output"]["tracks"][0]["name"], "Heroes");
    assert_eq!(body["output"]["tracks"][0]["reason"], "Soaring");
}

#[tokio::test]
async fn test_mood_recommendations_unparseable_output() {
    let ctx = TestContext::new().await;
    ctx.anthropic
        .mock_text_response("I think you'd enjoy some jazz standards.")
        .await;
    ctx.spotify.mock_token().await;

    let (status, body) =
        invoke(ctx.app(), "mood_recommendations", &mood_input("Mellow", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["output"]["error"], "Could not parse recommendations");
    assert_eq!(
        body["output"]["claudeResponse"],
        "I think you'd enjoy some jazz standards."
    );
    assert_eq!(ctx.spotify.search_calls().await, 0);
}

#[tokio::test]
async fn test_mood_recommendations_token_failure() {
    let ctx = TestContext::new().await;
    ctx.anthropic.mock_suggestions(&HAPPY_SUGGESTIONS).await;
    ctx.spotify.mock_token_failure(400, "invalid_client").await;

    let (status, body) =
        invoke(ctx.app(), "mood_recommendations", &mood_input("Happy", None)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Invocation failed");
    assert_eq!(body["details"], "invalid_client");
    assert_eq!(body["fullError"]["error"], "invalid_client");
}

#[tokio::test]
async fn test_mood_recommendations_malformed_input() {
    let ctx = TestContext::new().await;

    let (status, body) = invoke(ctx.app(), "mood_recommendations", "Happy").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Invocation failed");
    assert!(body["details"].is_string());
    assert_eq!(ctx.anthropic.message_calls().await, 0);
}

#[tokio::test]
async fn test_mood_recommendations_model_without_text() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "msg_empty",
            "model": "claude-3-haiku-20240307",
            "content": [],
            "stop_reason": "end_turn"
        })))
        .mount(ctx.anthropic.inner())
        .await;
    ctx.spotify.mock_token().await;

    let (status, body) =
        invoke(ctx.app(), "mood_recommendations", &mood_input("Happy", None)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Invocation failed");
    assert!(body.get("fullError").is_none());
}

// ========== CORS ==========

#[tokio::test]
async fn test_cors_preflight() {
    let ctx = TestContext::new().await;
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/invoke")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(ctx.app(), request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    for expected in ["GET", "POST", "PUT", "DELETE", "OPTIONS"] {
        assert!(methods.contains(expected), "missing {} in {}", expected, methods);
    }
    let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
        .to_str()
        .unwrap()
        .to_lowercase();
    assert!(allowed.contains("x-requested-with"));
    assert!(allowed.contains("authorization"));
}

#[tokio::test]
async fn test_cors_header_on_invoke_response() {
    let ctx = TestContext::new().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/invoke")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"tool": "nope", "input": ""}"#))
        .unwrap();

    let response = tower::ServiceExt::oneshot(ctx.app(), request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}
