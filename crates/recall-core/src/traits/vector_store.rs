//! Vector store trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RecallResult;
use crate::types::SearchFilters;

/// A similarity match from the vector store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorHit {
    pub record_id: String,
    /// Cosine similarity. The semantic channel clamps it to [0, 1].
    pub similarity: f32,
}

/// Vector similarity store over record embeddings.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Query by similarity to `embedding`, with `filters` applied as a
    /// metadata predicate at the store.
    async fn query(
        &self,
        embedding: &[f32],
        filters: &SearchFilters,
        top_n: usize,
    ) -> RecallResult<Vec<VectorHit>>;
}
