//! Dual-channel retrieval, score fusion, and mode selection.

pub mod fusion;
pub mod keyword;
pub mod mode;
pub mod semantic;

use serde::{Deserialize, Serialize};

/// A normalized hit from one retrieval channel, ready for fusion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelHit {
    pub record_id: String,
    /// Channel-normalized relevance in [0, 1].
    pub score: f32,
}
