//! Fused retrieval candidate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which retrieval channel(s) produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Keyword,
    Semantic,
    Both,
}

/// A record paired with its per-channel and fused scores for one query.
///
/// Deduplicated by `record_id`: a record found by both channels appears once
/// with both optional scores populated. Optional fields are absence of
/// evidence, not a penalty; fusion treats a missing score as 0 contribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Id of the underlying memory record.
    pub record_id: String,
    /// Capture timestamp, carried for recency scoring and tie-breaking.
    pub timestamp: DateTime<Utc>,
    /// Cosine similarity from the semantic channel, normalized to [0, 1].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_score: Option<f32>,
    /// Lexical relevance from the keyword channel, normalized to [0, 1].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_score: Option<f32>,
    /// Linear recency decay in [0, 1].
    pub recency_score: f32,
    /// 1.0 when the record matches an app hint, else 0.0.
    pub app_bonus: f32,
    /// Fixed bonus for allow-listed reliable hosts, else 0.0.
    pub source_bonus: f32,
    /// Composite confidence in [0, 1].
    pub confidence: f32,
    /// Which channel(s) surfaced this record.
    pub provenance: Provenance,
}
