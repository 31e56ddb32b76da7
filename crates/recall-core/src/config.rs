//! Configuration for the search engine.
//!
//! All tunables are explicit, documented constants injected at construction
//! time. Nothing here is learned or process-global; the orchestrator owns
//! its configuration and cache.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{RecallError, RecallResult};
use crate::retrieval::fusion::FusionWeights;

/// Main configuration for the search orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Fusion weights for composite confidence.
    pub weights: FusionWeights,
    /// Confidence threshold separating Exact-Hit from Memory-Jog mode.
    pub high_threshold: f32,
    /// Days over which recency decays linearly to zero.
    pub half_life_days: f32,
    /// Hosts considered reliable sources; matching records get `source_bonus`.
    pub reliable_hosts: Vec<String>,
    /// Per-channel retrieval timeout.
    #[serde(with = "duration_millis")]
    pub channel_timeout: Duration,
    /// Maximum cards returned in Exact-Hit mode.
    pub exact_limit: usize,
    /// Maximum cards returned in Memory-Jog mode.
    pub jog_limit: usize,
    /// Default requested result count when the caller omits `k`.
    pub default_k: usize,
    /// Maximum cached responses.
    pub cache_capacity: u64,
    /// Cached response time-to-live.
    #[serde(with = "duration_millis")]
    pub cache_ttl: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            weights: FusionWeights::default(),
            high_threshold: 0.78,
            half_life_days: 7.0,
            reliable_hosts: vec![
                "amazon.com".to_string(),
                "wikipedia.org".to_string(),
                "github.com".to_string(),
                "stackoverflow.com".to_string(),
            ],
            channel_timeout: Duration::from_millis(2_000),
            exact_limit: 3,
            jog_limit: 6,
            default_k: 6,
            cache_capacity: 1_024,
            cache_ttl: Duration::from_secs(60),
        }
    }
}

impl SearchConfig {
    /// Validate the configuration.
    ///
    /// Checks weight normalization and threshold/limit sanity so a bad
    /// construction fails loudly instead of producing skewed confidences.
    pub fn validate(&self) -> RecallResult<()> {
        self.weights
            .validate()
            .map_err(|e| RecallError::Configuration(e.to_string()))?;

        if !(0.0..=1.0).contains(&self.high_threshold) {
            return Err(RecallError::Configuration(format!(
                "high_threshold must be in [0, 1], got {}",
                self.high_threshold
            )));
        }
        if self.half_life_days <= 0.0 {
            return Err(RecallError::Configuration(
                "half_life_days must be positive".to_string(),
            ));
        }
        if self.exact_limit == 0 || self.jog_limit == 0 {
            return Err(RecallError::Configuration(
                "result limits must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a host is on the reliable-source allow-list.
    pub fn is_reliable_host(&self, host: &str) -> bool {
        let host = host.to_lowercase();
        self.reliable_hosts
            .iter()
            .any(|h| host == *h || host.ends_with(&format!(".{h}")))
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        SearchConfig::default().validate().unwrap();
    }

    #[test]
    fn test_bad_threshold_rejected() {
        let config = SearchConfig {
            high_threshold: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reliable_host_matches_subdomains() {
        let config = SearchConfig::default();
        assert!(config.is_reliable_host("amazon.com"));
        assert!(config.is_reliable_host("www.Amazon.com"));
        assert!(!config.is_reliable_host("notamazon.com"));
    }
}
