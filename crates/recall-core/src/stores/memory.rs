//! In-memory backend: keyword index, vector store, and record store over
//! a shared map, plus a deterministic hashing embedder.
//!
//! Lexical scoring is token-overlap term frequency, which is enough to
//! exercise the engine's normalization and fusion paths realistically.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::RecallResult;
use crate::traits::{Embedder, KeywordHit, KeywordIndex, RecordStore, VectorHit, VectorStore};
use crate::types::{MemoryRecord, SearchFilters};

struct Stored {
    record: MemoryRecord,
    embedding: Vec<f32>,
}

/// One store implementing all three backend traits.
pub struct InMemoryStore {
    embedder: Arc<dyn Embedder>,
    items: RwLock<HashMap<String, Stored>>,
}

impl InMemoryStore {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            items: RwLock::new(HashMap::new()),
        }
    }

    /// Ingest a record: embeds its text and makes it retrievable by both
    /// channels.
    pub async fn add(&self, record: MemoryRecord) -> RecallResult<()> {
        let text = format!("{} {}", record.window_title, record.raw_text);
        let embedding = self.embedder.embed(&text).await?;
        self.items.write().await.insert(
            record.id.clone(),
            Stored { record, embedding },
        );
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    fn passes(record: &MemoryRecord, filters: &SearchFilters) -> bool {
        if let Some(window) = &filters.time_window {
            if !window.contains(record.timestamp) {
                return false;
            }
        }
        if !filters.app_hints.is_empty()
            && !filters.app_hints.iter().any(|h| record.matches_app_hint(h))
        {
            return false;
        }
        true
    }
}

#[async_trait]
impl KeywordIndex for InMemoryStore {
    async fn query(
        &self,
        text: &str,
        filters: &SearchFilters,
        limit: usize,
    ) -> RecallResult<Vec<KeywordHit>> {
        let query_tokens: Vec<String> = tokenize(text);
        let items = self.items.read().await;

        let mut hits: Vec<KeywordHit> = items
            .values()
            .filter(|s| Self::passes(&s.record, filters))
            .filter_map(|s| {
                let haystack =
                    format!("{} {}", s.record.window_title, s.record.raw_text).to_lowercase();
                let doc_tokens = tokenize(&haystack);
                let score: f32 = query_tokens
                    .iter()
                    .map(|q| doc_tokens.iter().filter(|d| *d == q).count() as f32)
                    .sum();
                (score > 0.0).then(|| KeywordHit {
                    record_id: s.record.id.clone(),
                    score,
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.record_id.cmp(&b.record_id))
        });
        hits.truncate(limit);
        Ok(hits)
    }
}

#[async_trait]
impl VectorStore for InMemoryStore {
    async fn query(
        &self,
        embedding: &[f32],
        filters: &SearchFilters,
        top_n: usize,
    ) -> RecallResult<Vec<VectorHit>> {
        let items = self.items.read().await;

        let mut hits: Vec<VectorHit> = items
            .values()
            .filter(|s| Self::passes(&s.record, filters))
            .map(|s| VectorHit {
                record_id: s.record.id.clone(),
                similarity: cosine(embedding, &s.embedding),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.similarity
                .total_cmp(&a.similarity)
                .then_with(|| a.record_id.cmp(&b.record_id))
        });
        hits.truncate(top_n);
        Ok(hits)
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn get(&self, record_id: &str) -> RecallResult<Option<MemoryRecord>> {
        Ok(self
            .items
            .read()
            .await
            .get(record_id)
            .map(|s| s.record.clone()))
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if na == 0.0 || nb == 0.0 {
        0.0
    } else {
        dot / (na * nb)
    }
}

/// Deterministic token-hash embedder for tests and local runs.
///
/// Each token FNV-1a hashes into a bucket of a fixed-dimension vector;
/// the result is L2-normalized. Identical text always embeds identically,
/// which keeps end-to-end tests reproducible.
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(128)
    }
}

#[async_trait]
impl Embedder for HashingEmbedder {
    async fn embed(&self, text: &str) -> RecallResult<Vec<f32>> {
        let mut vector = vec![0.0_f32; self.dimension];
        for token in tokenize(text) {
            let bucket = (fnv1a(token.as_bytes()) as usize) % self.dimension;
            vector[bucket] += 1.0;
        }
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for b in bytes {
        hash ^= u64::from(*b);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}
