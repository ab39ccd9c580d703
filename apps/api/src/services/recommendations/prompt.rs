//! Prompt construction for mood-based suggestions

/// Stand-in used when the caller gives no preferences
pub const DEFAULT_PREFERENCES: &str =
    "Analyze their general music taste and create recommendations based on popular music algorithms";

/// Build the suggestion prompt for `mood`, falling back to
/// [`DEFAULT_PREFERENCES`] when `preferences` is missing or blank
pub fn build_mood_prompt(mood: &str, preferences: Option<&str>) -> String {
    let preferences = preferences
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_PREFERENCES);

    format!(
        r#"You are an advanced music algorithm expert. Analyze the user's music taste and create personalized recommendations.

User's mood: "{mood}"
User's music preferences: {preferences}

Based on music recommendation algorithms (like Spotify's, Apple Music's, etc.), analyze:
1. The user's likely music taste profile
2. Similar artists and tracks that match their preferences
3. Songs that align with their current mood while staying true to their taste
4. A mix of popular tracks and hidden gems that fit their algorithm

Suggest 10-12 specific songs that would appear in their personalized algorithm-based playlist for this mood.

Format your response as a JSON array of song recommendations, each with:
- songTitle: the exact song name
- artistName: the artist name
- reason: a brief explanation why this matches their mood AND their music algorithm/taste

Example format:
[
  {{"songTitle": "Song Name", "artistName": "Artist Name", "reason": "This track matches your energetic vibe and aligns with your taste in [genre], similar to artists you likely enjoy"}},
  ...
]

Return ONLY the JSON array, no other text."#
    )
}
