//! Keyword retrieval channel.
//!
//! Wraps the inverted text index and normalizes its native (unbounded)
//! relevance scores to [0, 1] for fusion. The channel degrades instead of
//! failing: an unreachable backend yields an empty candidate list.

use std::sync::Arc;

use tracing::warn;

use crate::traits::KeywordIndex;
use crate::types::SearchFilters;

use super::ChannelHit;

/// Lexical retrieval over record raw text.
pub struct KeywordChannel {
    index: Arc<dyn KeywordIndex>,
}

impl KeywordChannel {
    pub fn new(index: Arc<dyn KeywordIndex>) -> Self {
        Self { index }
    }

    /// Retrieve up to `limit` candidates by lexical relevance.
    ///
    /// Scores are normalized against the batch maximum, a saturating
    /// transform over the returned score distribution. Backend errors are
    /// logged at warning level and absorbed into an empty result.
    pub async fn retrieve(
        &self,
        text: &str,
        filters: &SearchFilters,
        limit: usize,
    ) -> Vec<ChannelHit> {
        let hits = match self.index.query(text, filters, limit).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(error = %e, "keyword channel unavailable, degrading to empty");
                return Vec::new();
            }
        };

        let max = hits.iter().map(|h| h.score).fold(0.0_f32, f32::max);
        hits.into_iter()
            .map(|h| ChannelHit {
                record_id: h.record_id,
                score: if max > 0.0 {
                    (h.score / max).clamp(0.0, 1.0)
                } else {
                    0.0
                },
            })
            .collect()
    }
}
