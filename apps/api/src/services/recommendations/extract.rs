//! Recovering song suggestions from free-form model output
//!
//! The model is asked for a bare JSON array but often wraps it in prose or a
//! markdown fence. Extraction takes the widest bracketed span (first `[` to
//! last `]`) and parses that; only when no such span exists is the whole text
//! parsed instead. There is no further fallback.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One song suggestion as the model writes it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSuggestion {
    pub song_title: String,
    pub artist_name: String,
    pub reason: String,
}

impl RawSuggestion {
    /// Catalog search query for this suggestion
    pub fn search_query(&self) -> String {
        format!("{} {}", self.song_title, self.artist_name)
    }
}

/// Model output that could not be turned into suggestions
#[derive(Debug, Clone, Error)]
#[error("could not parse suggestions: {reason}")]
pub struct ExtractionFailed {
    /// The model's text, untouched
    pub raw: String,
    /// Parser error
    pub reason: String,
}

/// Degraded `output` returned when extraction fails
#[derive(Debug, Clone, Serialize)]
pub struct UnparsedOutput {
    pub error: &'static str,
    #[serde(rename = "claudeResponse")]
    pub claude_response: String,
}

impl ExtractionFailed {
    /// Convert into the degraded success payload
    pub fn into_output(self) -> UnparsedOutput {
        UnparsedOutput {
            error: "Could not parse recommendations",
            claude_response: self.raw,
        }
    }
}

/// Return the slice from the first `[` to the last `]`, if both exist in
/// that order
fn bracketed_span(text: &str) -> Option<&str> {
    match (text.find('['), text.rfind(']')) {
        (Some(start), Some(end)) if start < end => Some(&text[start..=end]),
        _ => None,
    }
}

/// Extract the suggestion list from `text`
pub fn extract_suggestions(text: &str) -> Result<Vec<RawSuggestion>, ExtractionFailed> {
    let candidate = bracketed_span(text).unwrap_or(text);

    serde_json::from_str(candidate).map_err(|e| ExtractionFailed {
        raw: text.to_string(),
        reason: e.to_string(),
    })
}
