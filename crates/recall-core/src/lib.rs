//! recall-core - Hybrid retrieval and confidence ranking engine.
//!
//! Retrieves previously captured screen "memory" records matching a
//! free-text query, fuses keyword and semantic evidence into a single
//! confidence, decides between one confident answer (Exact-Hit) and a
//! short candidate list (Memory-Jog), and pulls typed facts ("nuggets")
//! out of noisy OCR text.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use recall_core::{SearchConfig, SearchOrchestrator, SearchRequest};
//! use recall_core::stores::{HashingEmbedder, InMemoryStore};
//!
//! let embedder = Arc::new(HashingEmbedder::default());
//! let store = Arc::new(InMemoryStore::new(embedder.clone()));
//! let engine = SearchOrchestrator::new(
//!     SearchConfig::default(),
//!     store.clone(),
//!     embedder,
//!     store.clone(),
//!     store,
//! )?;
//!
//! let response = engine.search(&SearchRequest::new("2 weeks ago Amazon price")).await?;
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod nuggets;
pub mod query;
pub mod retrieval;
pub mod search;
pub mod stores;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use cache::ResponseCache;
pub use config::SearchConfig;
pub use error::{RecallError, RecallResult};
pub use nuggets::{NuggetExtractor, NuggetMatcher};
pub use retrieval::fusion::FusionWeights;
pub use search::{SearchOrchestrator, SearchRequest};
pub use traits::{Embedder, KeywordIndex, RecordStore, VectorStore};
pub use types::{
    AnswerField, Candidate, Card, MemoryRecord, Nugget, NuggetKind, Provenance, SearchFilters,
    SearchMode, SearchResponse, StageTimings, StructuredQuery, TimeWindow,
};
