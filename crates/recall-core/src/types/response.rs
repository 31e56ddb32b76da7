//! Search response contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::nugget::Nugget;
use super::query::StructuredQuery;

/// How confident the engine is in its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// One high-confidence primary result (at most 3 cards).
    Exact,
    /// Several moderate-confidence candidates (at most 6 cards).
    Jog,
}

/// One result card presented to the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub record_id: String,
    pub app: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_host: Option<String>,
    pub window_title: String,
    pub timestamp: DateTime<Utc>,
    /// Leading slice of the record's raw text.
    pub snippet: String,
    /// Structured fact extracted from the raw text, when a matcher fired.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nugget: Option<Nugget>,
    /// Fused confidence for this record.
    pub score: f32,
}

/// Per-stage wall-clock durations, in microseconds.
///
/// `total_us` is the externally visible latency metric. On a cache hit only
/// `total_us` is meaningful and `cache_hit` is set.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StageTimings {
    pub parse_us: u64,
    pub retrieval_us: u64,
    pub fusion_us: u64,
    pub extraction_us: u64,
    pub total_us: u64,
    pub cache_hit: bool,
}

/// The full response for one search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub mode: SearchMode,
    /// Confidence of the top card, 0.0 when there are no cards.
    pub confidence: f32,
    /// Sorted strictly descending by `score`.
    pub cards: Vec<Card>,
    /// Echo of how the raw query was interpreted.
    pub query: StructuredQuery,
    pub timings: StageTimings,
}

impl SearchResponse {
    /// An empty Memory-Jog response. Zero candidates is a valid outcome,
    /// never an error.
    pub fn empty(query: StructuredQuery, timings: StageTimings) -> Self {
        Self {
            mode: SearchMode::Jog,
            confidence: 0.0,
            cards: Vec::new(),
            query,
            timings,
        }
    }
}
