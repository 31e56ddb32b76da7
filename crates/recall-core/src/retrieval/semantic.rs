//! Semantic retrieval channel.
//!
//! Embeds the query via the external Embedder and queries the vector store
//! by cosine similarity, with filters applied as a metadata predicate at the
//! store. Either collaborator failing degrades the channel to empty; the
//! orchestrator can still serve a keyword-only response.

use std::sync::Arc;

use tracing::warn;

use crate::traits::{Embedder, VectorStore};
use crate::types::SearchFilters;

use super::ChannelHit;

/// Similarity retrieval over record embeddings.
pub struct SemanticChannel {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
}

impl SemanticChannel {
    pub fn new(embedder: Arc<dyn Embedder>, store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, store }
    }

    /// Retrieve up to `top_n` candidates by similarity.
    ///
    /// Similarities are clamped to [0, 1]. Embedding or store failure is
    /// logged at warning level and absorbed into an empty result.
    pub async fn retrieve(
        &self,
        text: &str,
        filters: &SearchFilters,
        top_n: usize,
    ) -> Vec<ChannelHit> {
        let embedding = match self.embedder.embed(text).await {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "embedder unavailable, semantic channel degrading to empty");
                return Vec::new();
            }
        };

        match self.store.query(&embedding, filters, top_n).await {
            Ok(hits) => hits
                .into_iter()
                .map(|h| ChannelHit {
                    record_id: h.record_id,
                    score: h.similarity.clamp(0.0, 1.0),
                })
                .collect(),
            Err(e) => {
                warn!(error = %e, "vector store unavailable, semantic channel degrading to empty");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RecallError, RecallResult};
    use crate::traits::VectorHit;
    use async_trait::async_trait;

    struct FixedEmbedder;

    #[async_trait]
    impl Embedder for FixedEmbedder {
        async fn embed(&self, _: &str) -> RecallResult<Vec<f32>> {
            Ok(vec![1.0, 0.0])
        }

        fn dimension(&self) -> usize {
            2
        }
    }

    struct FailingEmbedder;

    #[async_trait]
    impl Embedder for FailingEmbedder {
        async fn embed(&self, _: &str) -> RecallResult<Vec<f32>> {
            Err(RecallError::embedding("provider down"))
        }

        fn dimension(&self) -> usize {
            2
        }
    }

    struct FixedStore(Vec<VectorHit>);

    #[async_trait]
    impl VectorStore for FixedStore {
        async fn query(
            &self,
            _: &[f32],
            _: &SearchFilters,
            top_n: usize,
        ) -> RecallResult<Vec<VectorHit>> {
            Ok(self.0.iter().take(top_n).cloned().collect())
        }
    }

    #[tokio::test]
    async fn test_similarity_clamped() {
        let channel = SemanticChannel::new(
            Arc::new(FixedEmbedder),
            Arc::new(FixedStore(vec![
                VectorHit {
                    record_id: "a".to_string(),
                    similarity: 1.2,
                },
                VectorHit {
                    record_id: "b".to_string(),
                    similarity: -0.1,
                },
            ])),
        );

        let hits = channel
            .retrieve("query", &SearchFilters::default(), 10)
            .await;
        assert_eq!(hits[0].score, 1.0);
        assert_eq!(hits[1].score, 0.0);
    }

    #[tokio::test]
    async fn test_embedder_failure_degrades_to_empty() {
        let channel = SemanticChannel::new(
            Arc::new(FailingEmbedder),
            Arc::new(FixedStore(vec![VectorHit {
                record_id: "a".to_string(),
                similarity: 0.9,
            }])),
        );

        let hits = channel
            .retrieve("query", &SearchFilters::default(), 10)
            .await;
        assert!(hits.is_empty());
    }
}
