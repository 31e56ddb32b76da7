//! Core types for recall.

mod candidate;
mod nugget;
mod query;
mod record;
mod response;

pub use candidate::{Candidate, Provenance};
pub use nugget::{Nugget, NuggetKind};
pub use query::{AnswerField, SearchFilters, StructuredQuery, TimeWindow};
pub use record::MemoryRecord;
pub use response::{Card, SearchMode, SearchResponse, StageTimings};
