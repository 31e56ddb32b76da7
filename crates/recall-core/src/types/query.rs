//! Structured query and filter types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Half-open time interval `[from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    /// Whether `ts` falls inside `[from, to)`.
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.from && ts < self.to
    }

    /// Window width in seconds. Used to compare specificity of
    /// competing time expressions.
    pub fn duration_secs(&self) -> i64 {
        (self.to - self.from).num_seconds()
    }
}

/// The kind of fact the query is implicitly asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerField {
    Price,
    Score,
    Title,
}

/// The parsed form of a raw query.
///
/// Produced by the query parser, echoed back in the response so callers can
/// see how their text was interpreted. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredQuery {
    /// Original query text, untouched.
    pub raw_text: String,
    /// Resolved time window, if the text contained a time expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_window: Option<TimeWindow>,
    /// Canonical app ids hinted at in the text, in order of appearance.
    pub app_hints: Vec<String>,
    /// Content words remaining after time/app/stopword stripping.
    pub topic_hints: Vec<String>,
    /// Implicit answer type, if the text asked for one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_field: Option<AnswerField>,
    /// Whether the query demanded exact matching.
    pub strict: bool,
}

/// Filters applied identically by both retrieval channels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Restrict to records captured inside this window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_window: Option<TimeWindow>,
    /// Restrict to records matching any of these app/host hints.
    pub app_hints: Vec<String>,
}

impl SearchFilters {
    /// Whether no filters are set (unbounded scan, result count still capped).
    pub fn is_empty(&self) -> bool {
        self.time_window.is_none() && self.app_hints.is_empty()
    }

    /// Stable string form used in cache keys.
    pub fn signature(&self) -> String {
        let window = match &self.time_window {
            Some(w) => format!("{}..{}", w.from.timestamp(), w.to.timestamp()),
            None => "*".to_string(),
        };
        format!("{}|{}", window, self.app_hints.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_window_is_half_open() {
        let from = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap();
        let w = TimeWindow::new(from, to);
        assert!(w.contains(from));
        assert!(!w.contains(to));
        assert_eq!(w.duration_secs(), 86_400);
    }

    #[test]
    fn test_filter_signature_is_stable() {
        let mut filters = SearchFilters::default();
        assert_eq!(filters.signature(), "*|");
        filters.app_hints.push("amazon".to_string());
        assert_eq!(filters.signature(), "*|amazon");
    }
}
