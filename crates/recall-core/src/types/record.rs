//! Captured memory record type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single captured memory produced by the ingestion pipeline.
///
/// Immutable from this crate's point of view: retrieval only reads records,
/// it never creates or mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Unique identifier assigned at ingestion.
    pub id: String,
    /// Capture time.
    pub timestamp: DateTime<Utc>,
    /// Application the capture came from (canonical id, e.g. "chrome").
    pub app: String,
    /// Host of the page being viewed, when the capture was a browser.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_host: Option<String>,
    /// Window title at capture time.
    pub window_title: String,
    /// OCR-extracted text. Noisy; downstream extraction must tolerate it.
    pub raw_text: String,
    /// Path to the associated media (frame or clip), if retained.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_path: Option<String>,
}

impl MemoryRecord {
    /// Age of this record in fractional days relative to `now`.
    pub fn age_days(&self, now: DateTime<Utc>) -> f32 {
        let secs = (now - self.timestamp).num_seconds().max(0) as f32;
        secs / 86_400.0
    }

    /// Case-insensitive match of `hint` against the app or url host.
    pub fn matches_app_hint(&self, hint: &str) -> bool {
        let hint = hint.to_lowercase();
        if self.app.to_lowercase().contains(&hint) {
            return true;
        }
        self.url_host
            .as_deref()
            .map(|h| h.to_lowercase().contains(&hint))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record() -> MemoryRecord {
        MemoryRecord {
            id: "rec-1".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            app: "Chrome".to_string(),
            url_host: Some("www.amazon.com".to_string()),
            window_title: "OMEGA Seamaster - Amazon".to_string(),
            raw_text: "OMEGA Seamaster $3,495 Add to cart".to_string(),
            media_path: None,
        }
    }

    #[test]
    fn test_age_days() {
        let r = record();
        let now = Utc.with_ymd_and_hms(2024, 5, 3, 12, 0, 0).unwrap();
        assert!((r.age_days(now) - 2.0).abs() < 1e-6);
        // Future timestamps clamp to zero age.
        let past = Utc.with_ymd_and_hms(2024, 4, 30, 0, 0, 0).unwrap();
        assert_eq!(r.age_days(past), 0.0);
    }

    #[test]
    fn test_matches_app_hint() {
        let r = record();
        assert!(r.matches_app_hint("amazon"));
        assert!(r.matches_app_hint("CHROME"));
        assert!(!r.matches_app_hint("netflix"));
    }
}
