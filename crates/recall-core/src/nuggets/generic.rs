//! Generic snippet fallback matcher.

use crate::types::{Nugget, NuggetKind};

use super::NuggetMatcher;

/// Fixed confidence for the fallback. Deliberately low: it carries no
/// structure, only a leading slice of the text.
const GENERIC_CONFIDENCE: f32 = 0.50;

/// Maximum snippet length in characters, cut at a word boundary.
const SNIPPET_CHARS: usize = 80;

/// Always fires on non-blank text; registered last so structured matchers
/// get the first look.
pub struct GenericMatcher;

impl NuggetMatcher for GenericMatcher {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn extract(&self, text: &str) -> Option<Nugget> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Nugget::new(
            NuggetKind::Generic,
            leading_snippet(trimmed, SNIPPET_CHARS),
            GENERIC_CONFIDENCE,
        ))
    }
}

/// Leading snippet of at most `max_chars`, cut back to the last full word.
pub fn leading_snippet(text: &str, max_chars: usize) -> String {
    let mut chars = 0;
    let mut cut = text.len();
    for (i, _) in text.char_indices() {
        if chars == max_chars {
            cut = i;
            break;
        }
        chars += 1;
    }
    if cut == text.len() {
        return text.to_string();
    }
    let head = &text[..cut];
    match head.rfind(char::is_whitespace) {
        Some(pos) if pos > 0 => head[..pos].trim_end().to_string(),
        _ => head.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_kept_whole() {
        let nugget = GenericMatcher.extract("  short note  ").unwrap();
        assert_eq!(nugget.kind, NuggetKind::Generic);
        assert_eq!(nugget.value, "short note");
        assert!((nugget.confidence - 0.50).abs() < 1e-6);
    }

    #[test]
    fn test_long_text_cut_at_word_boundary() {
        let text = "word ".repeat(40);
        let nugget = GenericMatcher.extract(&text).unwrap();
        assert!(nugget.value.chars().count() <= 80);
        assert!(nugget.value.ends_with("word"));
    }

    #[test]
    fn test_blank_text() {
        assert!(GenericMatcher.extract("   ").is_none());
    }
}
