//! Exact-Hit vs Memory-Jog mode selection.
//!
//! A two-outcome decision with no persisted state: either the top candidate
//! clears the high-confidence threshold and we present one confident answer,
//! or we present a short list to jog the user's memory.

use crate::config::SearchConfig;
use crate::types::{Candidate, SearchMode};

/// The selected mode and the trimmed candidate list.
#[derive(Debug)]
pub struct ModeSelection {
    pub mode: SearchMode,
    /// Confidence of the top candidate, 0.0 when empty.
    pub confidence: f32,
    pub candidates: Vec<Candidate>,
}

/// Pick a response mode and trim the ranked candidates.
///
/// `k` is the caller's requested result count; it bounds the list on top of
/// the mode cap. Fewer candidates than the cap are returned as-is, never
/// padded. Zero candidates yields an empty Jog selection, not an error.
pub fn select(mut candidates: Vec<Candidate>, config: &SearchConfig, k: usize) -> ModeSelection {
    let top_confidence = candidates.first().map(|c| c.confidence).unwrap_or(0.0);

    let (mode, cap) = if top_confidence >= config.high_threshold {
        (SearchMode::Exact, config.exact_limit)
    } else {
        (SearchMode::Jog, config.jog_limit)
    };

    candidates.truncate(cap.min(k));

    ModeSelection {
        mode,
        confidence: top_confidence,
        candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Provenance;
    use chrono::Utc;

    fn candidate(id: &str, confidence: f32) -> Candidate {
        Candidate {
            record_id: id.to_string(),
            timestamp: Utc::now(),
            semantic_score: Some(confidence),
            keyword_score: None,
            recency_score: 0.0,
            app_bonus: 0.0,
            source_bonus: 0.0,
            confidence,
            provenance: Provenance::Semantic,
        }
    }

    #[test]
    fn test_high_confidence_selects_exact() {
        let candidates: Vec<_> = (0..5)
            .map(|i| candidate(&format!("r{i}"), 0.9 - i as f32 * 0.1))
            .collect();
        let selection = select(candidates, &SearchConfig::default(), 6);

        assert_eq!(selection.mode, SearchMode::Exact);
        assert_eq!(selection.candidates.len(), 3);
        assert!((selection.confidence - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_moderate_confidence_selects_jog() {
        let candidates: Vec<_> = (0..10)
            .map(|i| candidate(&format!("r{i}"), 0.5 - i as f32 * 0.01))
            .collect();
        let selection = select(candidates, &SearchConfig::default(), 20);

        assert_eq!(selection.mode, SearchMode::Jog);
        assert_eq!(selection.candidates.len(), 6);
    }

    #[test]
    fn test_fewer_than_cap_never_padded() {
        let selection = select(vec![candidate("a", 0.4)], &SearchConfig::default(), 6);
        assert_eq!(selection.mode, SearchMode::Jog);
        assert_eq!(selection.candidates.len(), 1);
    }

    #[test]
    fn test_single_high_confidence_candidate_is_exact() {
        let selection = select(vec![candidate("a", 0.9)], &SearchConfig::default(), 6);
        assert_eq!(selection.mode, SearchMode::Exact);
        assert_eq!(selection.candidates.len(), 1);
    }

    #[test]
    fn test_empty_is_jog_with_zero_confidence() {
        let selection = select(Vec::new(), &SearchConfig::default(), 6);
        assert_eq!(selection.mode, SearchMode::Jog);
        assert_eq!(selection.confidence, 0.0);
        assert!(selection.candidates.is_empty());
    }

    #[test]
    fn test_k_bounds_below_mode_cap() {
        let candidates: Vec<_> = (0..10).map(|i| candidate(&format!("r{i}"), 0.5)).collect();
        let selection = select(candidates, &SearchConfig::default(), 2);
        assert_eq!(selection.candidates.len(), 2);
    }
}
