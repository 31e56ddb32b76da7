//! Numeric stat/score matcher.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{Nugget, NuggetKind};

use super::NuggetMatcher;

/// Fixed confidence for stat nuggets. Tunable constant, not derived.
const STAT_CONFIDENCE: f32 = 0.80;

/// `LABEL: number` patterns restricted to an allow-list of game/stat labels,
/// so arbitrary OCR noise like "PAGE: 3" never matches.
static STAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(SCORE|KILLS|POINTS|XP|RANKED)\s*[:\-]\s*(\d+)").unwrap()
});

/// Matches the first allow-listed `LABEL: number` pair in scan order.
pub struct StatMatcher;

impl NuggetMatcher for StatMatcher {
    fn name(&self) -> &'static str {
        "stat"
    }

    fn extract(&self, text: &str) -> Option<Nugget> {
        let cap = STAT.captures(text)?;
        Some(Nugget::new(
            NuggetKind::Score,
            cap[2].to_string(),
            STAT_CONFIDENCE,
        ))
    }
}
