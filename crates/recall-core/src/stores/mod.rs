//! Reference backend implementations of the collaborator traits.
//!
//! Production deployments plug real index/store/embedder implementations in
//! behind the traits; the in-memory backend here serves tests, local runs,
//! and the default server wiring.

mod memory;

pub use memory::{HashingEmbedder, InMemoryStore};
