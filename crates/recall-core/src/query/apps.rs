//! App and site alias table.
//!
//! Maps free-text names to canonical app ids. Maintained by hand; the
//! ingestion side uses the same canonical ids.

use std::ops::Range;

/// (alias substring, canonical id). Aliases are matched case-insensitively
/// as substrings of the query text.
const ALIASES: &[(&str, &str)] = &[
    ("amazon", "amazon"),
    ("youtube", "youtube"),
    ("github", "github"),
    ("netflix", "netflix"),
    ("spotify", "spotify"),
    ("steam", "steam"),
    ("reddit", "reddit"),
    ("twitter", "twitter"),
    ("twitch", "twitch"),
    ("discord", "discord"),
    ("slack", "slack"),
    ("gmail", "gmail"),
    ("ebay", "ebay"),
    ("wikipedia", "wikipedia"),
    ("stackoverflow", "stackoverflow"),
    ("stack overflow", "stackoverflow"),
    ("chrome", "chrome"),
    ("firefox", "firefox"),
    ("vscode", "vscode"),
    ("vs code", "vscode"),
    ("terminal", "terminal"),
];

/// An app hint found in the query text, with the byte span it occupied.
#[derive(Debug, Clone)]
pub struct AppMatch {
    pub canonical: String,
    pub span: Range<usize>,
}

/// Find all app hints in lowercased query text, in order of appearance.
/// Multiple hints are allowed; duplicates of the same canonical id collapse
/// to the first occurrence.
pub fn extract_apps(lower: &str) -> Vec<AppMatch> {
    let mut found: Vec<AppMatch> = Vec::new();

    for (alias, canonical) in ALIASES {
        let mut start = 0;
        while let Some(pos) = lower[start..].find(alias) {
            let begin = start + pos;
            found.push(AppMatch {
                canonical: (*canonical).to_string(),
                span: begin..begin + alias.len(),
            });
            start = begin + alias.len();
        }
    }

    found.sort_by_key(|m| m.span.start);
    let mut seen = Vec::new();
    found.retain(|m| {
        if seen.contains(&m.canonical) {
            false
        } else {
            seen.push(m.canonical.clone());
            true
        }
    });
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_hint() {
        let hints = extract_apps("2 weeks ago amazon price");
        assert_eq!(hints.len(), 1);
        assert_eq!(hints[0].canonical, "amazon");
    }

    #[test]
    fn test_multiple_hints_order_preserved() {
        let hints = extract_apps("that youtube video i shared on slack");
        let ids: Vec<_> = hints.iter().map(|h| h.canonical.as_str()).collect();
        assert_eq!(ids, vec!["youtube", "slack"]);
    }

    #[test]
    fn test_spaced_alias_collapses_with_compact_form() {
        let hints = extract_apps("stack overflow answer");
        assert_eq!(hints.len(), 1);
        assert_eq!(hints[0].canonical, "stackoverflow");
    }

    #[test]
    fn test_no_hints() {
        assert!(extract_apps("omega seamaster watch").is_empty());
    }
}
