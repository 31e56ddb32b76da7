//! Media title matcher.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{Nugget, NuggetKind};

use super::NuggetMatcher;

/// Fixed confidence for title nuggets. Tunable constant, not derived.
const TITLE_CONFIDENCE: f32 = 0.90;

/// Platform-specific title delimiter patterns, tried in order.
static TITLE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // "<title> - YouTube", "<title> - Netflix", "<title> - Spotify"
        Regex::new(r"(?m)^(.{3,120}?)\s+-\s+(?:YouTube|Netflix|Spotify|Twitch|Prime Video)\b")
            .unwrap(),
        // "<title> • 1.2M views"
        Regex::new(r"(?m)^(.{3,120}?)\s+•\s+[\d.,]+[KMB]?\s+views\b").unwrap(),
        // "Now Playing: <title>"
        Regex::new(r"(?i)now playing[:\s]+(.{3,120})$").unwrap(),
    ]
});

/// Matches window-title and player-overlay shapes that carry a media title.
pub struct TitleMatcher;

impl NuggetMatcher for TitleMatcher {
    fn name(&self) -> &'static str {
        "title"
    }

    fn extract(&self, text: &str) -> Option<Nugget> {
        for pattern in TITLE_PATTERNS.iter() {
            if let Some(cap) = pattern.captures(text) {
                let title = cap[1].trim();
                if !title.is_empty() {
                    return Some(Nugget::new(NuggetKind::Title, title, TITLE_CONFIDENCE));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_suffix() {
        let nugget = TitleMatcher
            .extract("Interstellar Docking Scene - YouTube")
            .unwrap();
        assert_eq!(nugget.kind, NuggetKind::Title);
        assert_eq!(nugget.value, "Interstellar Docking Scene");
        assert!((nugget.confidence - 0.90).abs() < 1e-6);
    }

    #[test]
    fn test_view_count_delimiter() {
        let nugget = TitleMatcher
            .extract("How Jet Engines Work • 2.4M views")
            .unwrap();
        assert_eq!(nugget.value, "How Jet Engines Work");
    }

    #[test]
    fn test_now_playing() {
        let nugget = TitleMatcher
            .extract("Now Playing: Bohemian Rhapsody")
            .unwrap();
        assert_eq!(nugget.value, "Bohemian Rhapsody");
    }

    #[test]
    fn test_no_title_shape() {
        assert!(TitleMatcher.extract("OMEGA Seamaster $3,495").is_none());
    }
}
