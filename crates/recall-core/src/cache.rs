//! Bounded, TTL'd response cache.
//!
//! Keyed by normalized query text plus the filter signature and requested
//! result count, so the same question asked the same way short-circuits
//! retrieval entirely. Owned by the orchestrator, not process-global.
//! moka handles concurrent reads/writes and LRU-style eviction; a dropped
//! or rejected write costs nothing.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

use crate::types::{SearchFilters, SearchResponse};

/// Concurrency-safe cache of assembled responses.
pub struct ResponseCache {
    cache: Cache<String, Arc<SearchResponse>>,
}

impl ResponseCache {
    /// Create a cache bounded by entry count with a per-entry TTL.
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    /// Cache key for a request. Query text is normalized (lowercased,
    /// whitespace-collapsed) so trivially different spellings share an entry.
    pub fn key(query_text: &str, filters: &SearchFilters, k: usize) -> String {
        let normalized = query_text
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        format!("{normalized}#{}#{k}", filters.signature())
    }

    pub fn get(&self, key: &str) -> Option<Arc<SearchResponse>> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, response: Arc<SearchResponse>) {
        self.cache.insert(key, response);
    }

    /// Number of cached responses.
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all entries.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
