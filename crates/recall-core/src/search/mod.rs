//! Search orchestration.
//!
//! Sequences the pipeline: validate, cache probe, parse, concurrent
//! dual-channel retrieval, fusion, mode selection, card assembly with
//! nugget extraction, and cache write. Every collaborator call sits behind
//! an isolation boundary; the only error a caller can see is validation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::cache::ResponseCache;
use crate::config::SearchConfig;
use crate::error::{RecallError, RecallResult};
use crate::nuggets::{leading_snippet, NuggetExtractor};
use crate::query;
use crate::retrieval::keyword::KeywordChannel;
use crate::retrieval::mode;
use crate::retrieval::semantic::SemanticChannel;
use crate::retrieval::fusion::ResultFuser;
use crate::retrieval::ChannelHit;
use crate::traits::{Embedder, KeywordIndex, RecordStore, VectorStore};
use crate::types::{
    Card, MemoryRecord, SearchFilters, SearchResponse, StageTimings, TimeWindow,
};

/// Card snippet length in characters.
const SNIPPET_CHARS: usize = 160;

/// Channels are asked for more than `k` so fusion has something to rank.
const OVERSAMPLE_FACTOR: usize = 2;

/// Bounds on the caller-requested result count.
pub const MIN_K: usize = 1;
pub const MAX_K: usize = 20;

/// One inbound search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query. Required, non-empty.
    pub q: String,
    /// Explicit lower time bound; overrides any parsed time expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime<Utc>>,
    /// Explicit upper time bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
    /// Explicit app filter, added to parsed hints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    /// Explicit host filter, added to parsed hints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Requested result count, 1..=20. Defaults to the configured value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k: Option<usize>,
}

impl SearchRequest {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            from: None,
            to: None,
            app: None,
            host: None,
            k: None,
        }
    }

    /// Validate the request and resolve `k`. Malformed input is rejected
    /// here, before any retrieval is attempted.
    fn validate(&self, config: &SearchConfig) -> RecallResult<usize> {
        if self.q.trim().is_empty() {
            return Err(RecallError::validation_field("q must not be empty", "q"));
        }
        let k = self.k.unwrap_or(config.default_k);
        if !(MIN_K..=MAX_K).contains(&k) {
            return Err(RecallError::validation_field(
                format!("k must be in {MIN_K}..={MAX_K}, got {k}"),
                "k",
            ));
        }
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from >= to {
                return Err(RecallError::validation_field(
                    "from must be earlier than to",
                    "from",
                ));
            }
        }
        Ok(k)
    }
}

/// The engine: owns its configuration, cache, channels, and extractors.
pub struct SearchOrchestrator {
    config: SearchConfig,
    cache: ResponseCache,
    keyword: KeywordChannel,
    semantic: SemanticChannel,
    records: Arc<dyn RecordStore>,
    extractor: NuggetExtractor,
}

impl SearchOrchestrator {
    /// Build an orchestrator over the four collaborators.
    pub fn new(
        config: SearchConfig,
        keyword_index: Arc<dyn KeywordIndex>,
        embedder: Arc<dyn Embedder>,
        vector_store: Arc<dyn VectorStore>,
        records: Arc<dyn RecordStore>,
    ) -> RecallResult<Self> {
        config.validate()?;
        let cache = ResponseCache::new(config.cache_capacity, config.cache_ttl);
        Ok(Self {
            keyword: KeywordChannel::new(keyword_index),
            semantic: SemanticChannel::new(embedder, vector_store),
            records,
            extractor: NuggetExtractor::new(),
            cache,
            config,
        })
    }

    /// Handle one search request, anchored at the current time.
    pub async fn search(&self, request: &SearchRequest) -> RecallResult<SearchResponse> {
        self.search_at(request, Utc::now()).await
    }

    /// Handle one search request anchored at an explicit `now`.
    ///
    /// Identical (request, now, underlying data) always produces the
    /// identical response, including tie-break order.
    pub async fn search_at(
        &self,
        request: &SearchRequest,
        now: DateTime<Utc>,
    ) -> RecallResult<SearchResponse> {
        let total_start = Instant::now();
        let k = request.validate(&self.config)?;

        let parse_start = Instant::now();
        let mut structured = query::parse(&request.q, now);
        let filters = self.build_filters(request, &structured, now);
        // The echoed query reflects the effective window, explicit bounds
        // included.
        structured.time_window = filters.time_window;
        let parse_us = parse_start.elapsed().as_micros() as u64;

        let cache_key = ResponseCache::key(&request.q, &filters, k);
        if let Some(cached) = self.cache.get(&cache_key) {
            debug!(key = %cache_key, "response cache hit");
            let mut response = (*cached).clone();
            response.timings.cache_hit = true;
            response.timings.total_us = total_start.elapsed().as_micros() as u64;
            return Ok(response);
        }

        let fetch_limit = k.max(self.config.jog_limit) * OVERSAMPLE_FACTOR;
        let retrieval_start = Instant::now();
        let (keyword_hits, semantic_hits) = tokio::join!(
            self.guarded(
                "keyword",
                self.keyword.retrieve(&request.q, &filters, fetch_limit)
            ),
            self.guarded(
                "semantic",
                self.semantic.retrieve(&request.q, &filters, fetch_limit)
            ),
        );
        let retrieval_us = retrieval_start.elapsed().as_micros() as u64;

        let fusion_start = Instant::now();
        let records = self
            .fetch_records(keyword_hits.iter().chain(semantic_hits.iter()))
            .await;
        let fuser = ResultFuser::new(&self.config);
        let candidates = fuser.fuse(&keyword_hits, &semantic_hits, &records, &structured, now);
        let selection = mode::select(candidates, &self.config, k);
        let fusion_us = fusion_start.elapsed().as_micros() as u64;

        let extraction_start = Instant::now();
        let cards = self.build_cards(&selection.candidates, &records);
        let extraction_us = extraction_start.elapsed().as_micros() as u64;

        let response = SearchResponse {
            mode: selection.mode,
            confidence: selection.confidence,
            cards,
            query: structured,
            timings: StageTimings {
                parse_us,
                retrieval_us,
                fusion_us,
                extraction_us,
                total_us: total_start.elapsed().as_micros() as u64,
                cache_hit: false,
            },
        };

        // Last step of the request future: a cancelled request is dropped
        // before reaching this point and never populates the cache.
        self.cache.insert(cache_key, Arc::new(response.clone()));
        Ok(response)
    }

    /// Merge explicit request filters with parsed query hints. An explicit
    /// time bound overrides the parsed expression; explicit app/host are
    /// appended to the parsed hints.
    fn build_filters(
        &self,
        request: &SearchRequest,
        structured: &crate::types::StructuredQuery,
        now: DateTime<Utc>,
    ) -> SearchFilters {
        let time_window = match (request.from, request.to) {
            (Some(from), Some(to)) => Some(TimeWindow::new(from, to)),
            (Some(from), None) => Some(TimeWindow::new(from, now + chrono::Duration::days(1))),
            (None, Some(to)) => Some(TimeWindow::new(DateTime::<Utc>::MIN_UTC, to)),
            (None, None) => structured.time_window,
        };

        let mut app_hints = structured.app_hints.clone();
        for extra in [&request.app, &request.host] {
            if let Some(hint) = extra {
                let hint = hint.to_lowercase();
                if !app_hints.contains(&hint) {
                    app_hints.push(hint);
                }
            }
        }

        SearchFilters {
            time_window,
            app_hints,
        }
    }

    /// Await a channel under its timeout. Overruns degrade to empty for this
    /// request only.
    async fn guarded(
        &self,
        channel: &'static str,
        fut: impl std::future::Future<Output = Vec<ChannelHit>>,
    ) -> Vec<ChannelHit> {
        match timeout(self.config.channel_timeout, fut).await {
            Ok(hits) => hits,
            Err(_) => {
                warn!(channel, timeout_ms = %self.config.channel_timeout.as_millis(),
                      "channel timed out, degrading to empty");
                Vec::new()
            }
        }
    }

    /// Fetch full records for every distinct hit id. Store errors and
    /// unknown ids are logged and skipped; they cost a candidate, not the
    /// request.
    async fn fetch_records<'a>(
        &self,
        hits: impl Iterator<Item = &'a ChannelHit>,
    ) -> HashMap<String, MemoryRecord> {
        let mut out = HashMap::new();
        for hit in hits {
            if out.contains_key(&hit.record_id) {
                continue;
            }
            match self.records.get(&hit.record_id).await {
                Ok(Some(record)) => {
                    out.insert(hit.record_id.clone(), record);
                }
                Ok(None) => {
                    warn!(record_id = %hit.record_id, "hit refers to unknown record, skipping");
                }
                Err(e) => {
                    warn!(record_id = %hit.record_id, error = %e,
                          "record fetch failed, skipping candidate");
                }
            }
        }
        out
    }

    fn build_cards(
        &self,
        candidates: &[crate::types::Candidate],
        records: &HashMap<String, MemoryRecord>,
    ) -> Vec<Card> {
        candidates
            .iter()
            .filter_map(|c| {
                let record = records.get(&c.record_id)?;
                Some(Card {
                    record_id: record.id.clone(),
                    app: record.app.clone(),
                    url_host: record.url_host.clone(),
                    window_title: record.window_title.clone(),
                    timestamp: record.timestamp,
                    snippet: leading_snippet(record.raw_text.trim(), SNIPPET_CHARS),
                    nugget: self.extractor.extract(&record.raw_text),
                    score: c.confidence,
                })
            })
            .collect()
    }

    /// The active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Number of cached responses, for observability endpoints.
    pub fn cached_responses(&self) -> u64 {
        self.cache.len()
    }
}
