//! Query understanding.
//!
//! Turns raw query text into a [`StructuredQuery`]: time window, app hints,
//! topic hints, implicit answer field, and strictness. Pure and
//! deterministic given (text, now); no side effects.

mod apps;
mod time;

use std::ops::Range;

use chrono::{DateTime, Utc};

use crate::types::{AnswerField, StructuredQuery};

pub use apps::extract_apps;
pub use time::extract_time;

/// Words carrying no topical content on their own.
const STOPWORDS: &[&str] = &[
    "a", "an", "the", "i", "me", "my", "we", "was", "were", "is", "are", "be",
    "been", "it", "its", "that", "this", "those", "these", "what", "when",
    "where", "which", "who", "how", "did", "do", "does", "had", "have", "has",
    "on", "in", "at", "of", "or", "and", "for", "to", "from", "with", "about",
    "show", "find", "looking", "look", "saw", "see", "seen", "remember",
    "thing", "some", "something", "there", "then", "maybe", "no", "not",
    "wait", "exact", "exactly",
];

/// Keyword table resolving implicit answer-field intent. First token of the
/// query matching any entry wins.
const ANSWER_FIELDS: &[(&str, AnswerField)] = &[
    ("price", AnswerField::Price),
    ("cost", AnswerField::Price),
    ("paid", AnswerField::Price),
    ("score", AnswerField::Score),
    ("kills", AnswerField::Score),
    ("points", AnswerField::Score),
    ("xp", AnswerField::Score),
    ("ranked", AnswerField::Score),
    ("title", AnswerField::Title),
    ("name", AnswerField::Title),
    ("called", AnswerField::Title),
];

/// Parse raw query text into its structured form.
pub fn parse(text: &str, now: DateTime<Utc>) -> StructuredQuery {
    let lower = text.to_lowercase();

    let time_matches = time::find_all(&lower, now);
    let app_matches = apps::extract_apps(&lower);

    // Spans consumed by time/app extraction; their tokens are not topics.
    // Every time expression counts, including ones that lose the
    // specificity tie-break.
    let mut consumed: Vec<Range<usize>> = Vec::new();
    consumed.extend(time_matches.iter().map(|m| m.span.clone()));
    consumed.extend(app_matches.iter().map(|m| m.span.clone()));

    let time_match = time::pick_winner(time_matches);

    let mut topic_hints = Vec::new();
    for (token, span) in tokenize(&lower) {
        if STOPWORDS.contains(&token.as_str()) {
            continue;
        }
        if consumed.iter().any(|c| overlaps(c, &span)) {
            continue;
        }
        if !topic_hints.contains(&token) {
            topic_hints.push(token);
        }
    }

    let answer_field = tokenize(&lower).into_iter().find_map(|(token, _)| {
        ANSWER_FIELDS
            .iter()
            .find(|(kw, _)| *kw == token)
            .map(|(_, field)| *field)
    });

    let strict = lower.contains('"') || lower.split_whitespace().any(|w| w == "exact" || w == "exactly");

    StructuredQuery {
        raw_text: text.to_string(),
        time_window: time_match.map(|m| m.window),
        app_hints: app_matches.into_iter().map(|m| m.canonical).collect(),
        topic_hints,
        answer_field,
        strict,
    }
}

/// Split lowercased text into alphanumeric tokens with their byte spans.
fn tokenize(lower: &str) -> Vec<(String, Range<usize>)> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in lower.char_indices() {
        if c.is_alphanumeric() {
            start.get_or_insert(i);
        } else if let Some(s) = start.take() {
            tokens.push((lower[s..i].to_string(), s..i));
        }
    }
    if let Some(s) = start {
        tokens.push((lower[s..].to_string(), s..lower.len()));
    }
    tokens
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 15, 18, 30, 0).unwrap()
    }

    #[test]
    fn test_full_parse() {
        let q = parse("2 weeks ago Amazon price", now());
        let window = q.time_window.unwrap();
        assert_eq!(window.duration_secs(), 7 * 86_400);
        assert_eq!(q.app_hints, vec!["amazon"]);
        assert_eq!(q.answer_field, Some(AnswerField::Price));
        assert!(!q.strict);
        // "2", "weeks", "ago" consumed by the time span; "amazon" by the
        // app span. "price" remains topical.
        assert_eq!(q.topic_hints, vec!["price"]);
    }

    #[test]
    fn test_topic_hints_dedupe_in_order() {
        let q = parse("watch omega watch seamaster", now());
        assert_eq!(q.topic_hints, vec!["watch", "omega", "seamaster"]);
    }

    #[test]
    fn test_answer_field_first_match_wins() {
        let q = parse("title and score of that game", now());
        assert_eq!(q.answer_field, Some(AnswerField::Title));
    }

    #[test]
    fn test_strict_from_quotes() {
        assert!(parse("\"omega seamaster\" listing", now()).strict);
        assert!(parse("the exact price on amazon", now()).strict);
        assert!(!parse("omega seamaster listing", now()).strict);
    }

    #[test]
    fn test_losing_time_expression_not_a_topic() {
        let q = parse("yesterday or maybe last month", now());
        // "yesterday" wins on specificity, but "last month" is still a
        // consumed time expression, not topic material.
        assert_eq!(q.time_window.unwrap().duration_secs(), 86_400);
        assert!(q.topic_hints.is_empty());
    }

    #[test]
    fn test_no_signals() {
        let q = parse("omega seamaster", now());
        assert!(q.time_window.is_none());
        assert!(q.app_hints.is_empty());
        assert!(q.answer_field.is_none());
        assert_eq!(q.topic_hints, vec!["omega", "seamaster"]);
    }

    #[test]
    fn test_deterministic() {
        let a = parse("yesterday netflix title", now());
        let b = parse("yesterday netflix title", now());
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
