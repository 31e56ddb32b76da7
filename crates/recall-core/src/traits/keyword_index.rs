//! Keyword index trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RecallResult;
use crate::types::SearchFilters;

/// A lexical match from the inverted index.
///
/// `score` is on the backend's native scale (BM25 or similar, unbounded);
/// the keyword channel normalizes it before fusion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordHit {
    pub record_id: String,
    pub score: f32,
}

/// Inverted text index over record raw text.
#[async_trait]
pub trait KeywordIndex: Send + Sync {
    /// Query by lexical relevance, restricted by `filters`.
    ///
    /// Must work with zero filters (unbounded scan); `limit` still bounds
    /// the result count.
    async fn query(
        &self,
        text: &str,
        filters: &SearchFilters,
        limit: usize,
    ) -> RecallResult<Vec<KeywordHit>>;
}
