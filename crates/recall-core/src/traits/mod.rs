//! Collaborator traits consumed by the retrieval engine.
//!
//! Implementations (real indexes, vector databases, embedding providers)
//! live outside this crate; only their query interfaces are specified here.

mod embedder;
mod keyword_index;
mod record_store;
mod vector_store;

pub use embedder::Embedder;
pub use keyword_index::{KeywordHit, KeywordIndex};
pub use record_store::RecordStore;
pub use vector_store::{VectorHit, VectorStore};
