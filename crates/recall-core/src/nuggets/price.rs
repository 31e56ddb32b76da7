//! Currency/price matcher.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{Nugget, NuggetKind};

use super::NuggetMatcher;

/// Fixed confidence for price nuggets. Tunable constant, not derived.
const PRICE_CONFIDENCE: f32 = 0.85;

static CURRENCY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[$£€¥]\s?\d{1,3}(?:,\d{3})*(?:\.\d{1,2})?").unwrap()
});

/// Finds currency amounts; when several occur (list pages, carts), the
/// numerically largest is assumed to be the item of interest.
pub struct PriceMatcher;

impl NuggetMatcher for PriceMatcher {
    fn name(&self) -> &'static str {
        "price"
    }

    fn extract(&self, text: &str) -> Option<Nugget> {
        let best = CURRENCY
            .find_iter(text)
            .max_by(|a, b| {
                numeric_value(a.as_str())
                    .partial_cmp(&numeric_value(b.as_str()))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })?;

        Some(Nugget::new(
            NuggetKind::Price,
            best.as_str().replace(' ', ""),
            PRICE_CONFIDENCE,
        ))
    }
}

fn numeric_value(amount: &str) -> f64 {
    amount
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect::<String>()
        .parse()
        .unwrap_or(0.0)
}
