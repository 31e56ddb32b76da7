//! Embedder trait.

use async_trait::async_trait;

use crate::error::RecallResult;

/// Core Embedder trait - turns query text into a fixed-dimension vector.
///
/// May fail (network provider, model unavailable); callers must treat a
/// failure as "semantic channel unavailable", never as a request error.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> RecallResult<Vec<f32>>;

    /// Dimension of the produced embeddings.
    fn dimension(&self) -> usize;
}
