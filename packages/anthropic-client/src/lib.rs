//! Anthropic Messages API client for MoodMix
//!
//! A small non-streaming client for the `/v1/messages` endpoint, used both for
//! the chat passthrough tool and for asking the model for song suggestions.
//!
//! # Thread Safety
//!
//! `AnthropicClient` is `Clone + Send + Sync` and can be safely shared
//! across tasks. It uses a shared HTTP client connection pool.
//!
//! # Example
//!
//! ```no_run
//! use moodmix_anthropic_client::AnthropicClient;
//! use moodmix_shared_config::AnthropicConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AnthropicConfig::from_env()?;
//! let client = AnthropicClient::new(&config, None)?;
//!
//! let reply = client.complete("Name one song about rain.", 300).await?;
//! println!("{}", reply);
//! # Ok(())
//! # }
//! ```
//!
//! # Environment Variables
//!
//! - `ANTHROPIC_API_KEY`: API key (required)
//! - `ANTHROPIC_API_URL`: base URL override
//! - `ANTHROPIC_MODEL`: model override

mod client;
mod error;
mod models;

pub use client::{AnthropicClient, ANTHROPIC_VERSION};
pub use error::{AnthropicError, AnthropicResult};
pub use models::{ContentBlock, Message, MessagesRequest, MessagesResponse, Role, Usage};
