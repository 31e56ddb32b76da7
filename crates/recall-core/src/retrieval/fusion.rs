//! Score fusion for hybrid retrieval.
//!
//! Unions candidates from both channels and computes a composite confidence
//! as a linear weighted sum. The formula is intentionally linear and
//! auditable: fixed, documented weights, no learned components.

use std::cmp::Reverse;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::types::{Candidate, MemoryRecord, Provenance, StructuredQuery};

use super::ChannelHit;

/// Confidence resolution for tie-breaking. Two candidates whose confidences
/// differ by less than this are considered tied.
const TIE_EPSILON: f64 = 1e-9;

/// Multiplier on the semantic term for strict queries when a candidate has
/// no keyword evidence. Strict queries demand lexical corroboration.
const STRICT_FUZZY_PENALTY: f32 = 0.5;

/// Weights for the linear confidence formula. Must sum to 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FusionWeights {
    pub semantic: f32,
    pub keyword: f32,
    pub recency: f32,
    pub app: f32,
    pub source: f32,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            semantic: 0.40,
            keyword: 0.30,
            recency: 0.15,
            app: 0.10,
            source: 0.05,
        }
    }
}

impl FusionWeights {
    /// Validate that weights are non-negative and sum to approximately 1.0.
    pub fn validate(&self) -> Result<(), &'static str> {
        let sum = self.semantic + self.keyword + self.recency + self.app + self.source;
        if (sum - 1.0).abs() > 0.01 {
            return Err("fusion weights must sum to 1.0");
        }
        if self.semantic < 0.0
            || self.keyword < 0.0
            || self.recency < 0.0
            || self.app < 0.0
            || self.source < 0.0
        {
            return Err("fusion weights must be non-negative");
        }
        Ok(())
    }
}

/// Fuses per-channel hits into ranked candidates.
pub struct ResultFuser<'a> {
    config: &'a SearchConfig,
}

impl<'a> ResultFuser<'a> {
    pub fn new(config: &'a SearchConfig) -> Self {
        Self { config }
    }

    /// Union, score, and rank candidates.
    ///
    /// A score missing from one channel contributes 0 (absence of evidence,
    /// not a penalty). Hits whose record is missing from `records` are
    /// dropped; the caller logs those. Output is sorted descending by
    /// confidence with a deterministic tie-break: confidences within 1e-9
    /// are ordered newer-record-first, then by ascending record id.
    pub fn fuse(
        &self,
        keyword_hits: &[ChannelHit],
        semantic_hits: &[ChannelHit],
        records: &HashMap<String, MemoryRecord>,
        query: &StructuredQuery,
        now: DateTime<Utc>,
    ) -> Vec<Candidate> {
        struct Merged {
            keyword: Option<f32>,
            semantic: Option<f32>,
            provenance: Provenance,
        }

        let mut merged: HashMap<&str, Merged> = HashMap::new();

        for hit in keyword_hits {
            merged.insert(
                hit.record_id.as_str(),
                Merged {
                    keyword: Some(hit.score),
                    semantic: None,
                    provenance: Provenance::Keyword,
                },
            );
        }
        for hit in semantic_hits {
            merged
                .entry(hit.record_id.as_str())
                .and_modify(|m| {
                    m.semantic = Some(hit.score);
                    m.provenance = Provenance::Both;
                })
                .or_insert(Merged {
                    keyword: None,
                    semantic: Some(hit.score),
                    provenance: Provenance::Semantic,
                });
        }

        let weights = &self.config.weights;
        let mut candidates: Vec<Candidate> = merged
            .into_iter()
            .filter_map(|(id, m)| {
                let record = records.get(id)?;

                let recency_score = self.recency(record, now);
                let app_bonus = if query
                    .app_hints
                    .iter()
                    .any(|hint| record.matches_app_hint(hint))
                {
                    1.0
                } else {
                    0.0
                };
                let source_bonus = record
                    .url_host
                    .as_deref()
                    .map(|h| self.config.is_reliable_host(h))
                    .unwrap_or(false) as u8 as f32;

                let mut semantic_term = m.semantic.unwrap_or(0.0);
                if query.strict && m.keyword.is_none() {
                    semantic_term *= STRICT_FUZZY_PENALTY;
                }

                let confidence = (weights.semantic * semantic_term
                    + weights.keyword * m.keyword.unwrap_or(0.0)
                    + weights.recency * recency_score
                    + weights.app * app_bonus
                    + weights.source * source_bonus)
                    .clamp(0.0, 1.0);

                Some(Candidate {
                    record_id: record.id.clone(),
                    timestamp: record.timestamp,
                    semantic_score: m.semantic,
                    keyword_score: m.keyword,
                    recency_score,
                    app_bonus,
                    source_bonus,
                    confidence,
                    provenance: m.provenance,
                })
            })
            .collect();

        // Quantizing confidence to the tie epsilon makes the comparator a
        // total order, so identical inputs always produce identical order.
        candidates.sort_by_key(|c| {
            (
                Reverse(OrderedFloat((c.confidence as f64 / TIE_EPSILON).round())),
                Reverse(c.timestamp),
                c.record_id.clone(),
            )
        });
        candidates
    }

    /// Linear recency decay: 1 at capture time, 0 at and beyond the
    /// half-life horizon. Old records discount to 0 but are never excluded;
    /// exclusion is the job of an explicit time-window filter.
    fn recency(&self, record: &MemoryRecord, now: DateTime<Utc>) -> f32 {
        (1.0 - record.age_days(now) / self.config.half_life_days).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap()
    }

    fn record(id: &str, age_days: i64) -> MemoryRecord {
        MemoryRecord {
            id: id.to_string(),
            timestamp: now() - Duration::days(age_days),
            app: "chrome".to_string(),
            url_host: Some("example.org".to_string()),
            window_title: format!("window {id}"),
            raw_text: format!("text for {id}"),
            media_path: None,
        }
    }

    fn query() -> StructuredQuery {
        StructuredQuery {
            raw_text: "test".to_string(),
            time_window: None,
            app_hints: Vec::new(),
            topic_hints: vec!["test".to_string()],
            answer_field: None,
            strict: false,
        }
    }

    fn hit(id: &str, score: f32) -> ChannelHit {
        ChannelHit {
            record_id: id.to_string(),
            score,
        }
    }

    fn records(items: Vec<MemoryRecord>) -> HashMap<String, MemoryRecord> {
        items.into_iter().map(|r| (r.id.clone(), r)).collect()
    }

    #[test]
    fn test_union_dedupes_by_record_id() {
        let config = SearchConfig::default();
        let fuser = ResultFuser::new(&config);
        let recs = records(vec![record("a", 0)]);

        let candidates = fuser.fuse(
            &[hit("a", 0.8)],
            &[hit("a", 0.9)],
            &recs,
            &query(),
            now(),
        );

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].keyword_score, Some(0.8));
        assert_eq!(candidates[0].semantic_score, Some(0.9));
        assert_eq!(candidates[0].provenance, Provenance::Both);
    }

    #[test]
    fn test_missing_channel_score_contributes_zero() {
        let config = SearchConfig::default();
        let fuser = ResultFuser::new(&config);
        let recs = records(vec![record("a", 0)]);

        let candidates = fuser.fuse(&[hit("a", 1.0)], &[], &recs, &query(), now());

        // keyword 0.3 * 1.0 + recency 0.15 * 1.0; no semantic/app/source.
        assert!((candidates[0].confidence - 0.45).abs() < 1e-6);
        assert_eq!(candidates[0].provenance, Provenance::Keyword);
    }

    #[test]
    fn test_app_hint_bonus() {
        let config = SearchConfig::default();
        let fuser = ResultFuser::new(&config);
        let recs = records(vec![record("a", 0)]);
        let mut q = query();
        q.app_hints.push("chrome".to_string());

        let candidates = fuser.fuse(&[hit("a", 1.0)], &[], &recs, &q, now());
        assert_eq!(candidates[0].app_bonus, 1.0);
        assert!((candidates[0].confidence - 0.55).abs() < 1e-6);
    }

    #[test]
    fn test_reliable_host_bonus() {
        let config = SearchConfig::default();
        let fuser = ResultFuser::new(&config);
        let mut rec = record("a", 0);
        rec.url_host = Some("www.amazon.com".to_string());
        let recs = records(vec![rec]);

        let candidates = fuser.fuse(&[hit("a", 0.0)], &[], &recs, &query(), now());
        assert_eq!(candidates[0].source_bonus, 1.0);
    }

    #[test]
    fn test_recency_decays_to_zero_but_keeps_candidate() {
        let config = SearchConfig::default();
        let fuser = ResultFuser::new(&config);
        let recs = records(vec![record("old", 30)]);

        let candidates = fuser.fuse(&[hit("old", 1.0)], &[], &recs, &query(), now());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].recency_score, 0.0);
    }

    #[test]
    fn test_tie_break_newer_then_lower_id() {
        let config = SearchConfig::default();
        let fuser = ResultFuser::new(&config);

        // Same age and scores: tie on confidence and timestamp, so the
        // lower record id wins.
        let recs = records(vec![record("b", 2), record("a", 2)]);
        let candidates = fuser.fuse(
            &[hit("a", 0.7), hit("b", 0.7)],
            &[],
            &recs,
            &query(),
            now(),
        );
        assert_eq!(candidates[0].record_id, "a");

        // Different ages: newer record wins the tie on confidence.
        let mut newer = record("z", 0);
        let mut older = record("a", 10);
        // Equalize recency by pushing both past the horizon.
        newer.timestamp = now() - Duration::days(8);
        older.timestamp = now() - Duration::days(10);
        let recs = records(vec![newer, older]);
        let candidates = fuser.fuse(
            &[hit("a", 0.7), hit("z", 0.7)],
            &[],
            &recs,
            &query(),
            now(),
        );
        assert_eq!(candidates[0].record_id, "z");
    }

    #[test]
    fn test_strict_penalizes_semantic_only_hits() {
        let config = SearchConfig::default();
        let fuser = ResultFuser::new(&config);
        let recs = records(vec![record("a", 30)]);
        let mut q = query();

        let loose = fuser.fuse(&[], &[hit("a", 1.0)], &recs, &q, now());
        q.strict = true;
        let strict = fuser.fuse(&[], &[hit("a", 1.0)], &recs, &q, now());

        assert!(strict[0].confidence < loose[0].confidence);
    }

    #[test]
    fn test_missing_record_dropped() {
        let config = SearchConfig::default();
        let fuser = ResultFuser::new(&config);
        let recs = records(vec![record("a", 0)]);

        let candidates = fuser.fuse(
            &[hit("a", 1.0), hit("ghost", 1.0)],
            &[],
            &recs,
            &query(),
            now(),
        );
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_confidence_in_unit_range() {
        let config = SearchConfig::default();
        let fuser = ResultFuser::new(&config);
        let mut rec = record("a", 0);
        rec.url_host = Some("amazon.com".to_string());
        let recs = records(vec![rec]);
        let mut q = query();
        q.app_hints.push("chrome".to_string());

        let candidates = fuser.fuse(
            &[hit("a", 1.0)],
            &[hit("a", 1.0)],
            &recs,
            &q,
            now(),
        );
        // All terms maxed: weights sum to 1, so confidence is exactly 1.
        assert!((candidates[0].confidence - 1.0).abs() < 1e-6);
    }
}
