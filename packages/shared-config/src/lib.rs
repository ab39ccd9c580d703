//! Shared configuration types for MoodMix services
//!
//! Both upstream clients and the API server read their settings through the
//! types in this crate so the environment variable names live in one place.

mod anthropic;
mod error;
mod spotify;

pub use anthropic::AnthropicConfig;
pub use error::{ConfigError, ConfigResult};
pub use spotify::SpotifyConfig;

use std::env;

/// Common configuration shared between all services
#[derive(Debug, Clone)]
pub struct CommonConfig {
    /// Model chat API configuration
    pub anthropic: AnthropicConfig,

    /// Catalog API configuration
    pub spotify: SpotifyConfig,

    /// Optional request timeout applied to both upstream HTTP clients
    pub upstream_timeout_secs: Option<u64>,

    /// Environment mode (development, staging, production)
    pub environment: Environment,
}

/// Application environment mode
///
/// Only an explicit `development` selects [`Environment::Development`]; an
/// unset or unrecognised value is treated as production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    Staging,
    #[default]
    Production,
}

impl std::str::FromStr for Environment {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "development" | "dev" => Self::Development,
            "staging" | "stage" => Self::Staging,
            _ => Self::Production,
        })
    }
}

impl Environment {
    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a development environment
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Staging => write!(f, "staging"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl CommonConfig {
    /// Load common configuration from environment variables
    ///
    /// Fails when any upstream credential is missing or empty.
    pub fn from_env() -> ConfigResult<Self> {
        let upstream_timeout_secs = match env::var("UPSTREAM_TIMEOUT_SECS") {
            Ok(val) if !val.trim().is_empty() => Some(val.trim().parse().map_err(
                |e: std::num::ParseIntError| {
                    ConfigError::InvalidValue("UPSTREAM_TIMEOUT_SECS".to_string(), e.to_string())
                },
            )?),
            _ => None,
        };

        Ok(Self {
            anthropic: AnthropicConfig::from_env()?,
            spotify: SpotifyConfig::from_env()?,
            upstream_timeout_secs,
            environment: env::var("ENVIRONMENT")
                .ok()
                .and_then(|val| val.parse().ok())
                .unwrap_or_default(),
        })
    }
}

/// Helper function to get a required, non-empty environment variable
pub fn get_required_env(name: &str) -> ConfigResult<String> {
    match env::var(name) {
        Ok(val) if !val.trim().is_empty() => Ok(val),
        _ => Err(ConfigError::MissingEnvVar(name.to_string())),
    }
}

/// Helper function to get an optional environment variable with a default
pub fn get_env_or_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Helper function to parse an environment variable into a specific type
pub fn parse_env<T>(name: &str, default: T) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val
            .parse()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), format!("{}", e))),
        Err(_) => Ok(default),
    }
}
