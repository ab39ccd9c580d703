//! Test fixtures for API integration tests

#![allow(dead_code)]

use moodmix_api::Config;
use moodmix_shared_config::{AnthropicConfig, CommonConfig, Environment, SpotifyConfig};

/// Ten well-known upbeat songs as `(title, artist, reason)`
pub const HAPPY_SUGGESTIONS: [(&str, &str, &str); 10] = [
    ("Walking on Sunshine", "Katrina and the Waves", "Bright and bouncy"),
    ("Happy", "Pharrell Williams", "It says it in the title"),
    ("Good as Hell", "Lizzo", "Confidence boost"),
    ("Uptown Funk", "Mark Ronson", "Irresistible groove"),
    ("Mr. Blue Sky", "Electric Light Orchestra", "Sunny orchestral pop"),
    ("Dancing Queen", "ABBA", "Pure joy"),
    ("September", "Earth, Wind & Fire", "Celebration anthem"),
    ("Shake It Off", "Taylor Swift", "Carefree energy"),
    ("Don't Stop Me Now", "Queen", "Unstoppable mood"),
    ("Can't Stop the Feeling!", "Justin Timberlake", "Feel-good pop"),
];

/// Build a config pointing both upstreams at mock servers
pub fn test_config(anthropic_url: &str, spotify_url: &str, environment: Environment) -> Config {
    Config {
        common: CommonConfig {
            anthropic: AnthropicConfig::with_url(anthropic_url, "sk-ant-test"),
            spotify: SpotifyConfig::with_url(spotify_url, "client-id", "client-secret"),
            upstream_timeout_secs: Some(5),
            environment,
        },
        port: 0,
        resolver_delay_ms: 0,
    }
}
