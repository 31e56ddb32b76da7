//! Nugget extraction from noisy OCR text.
//!
//! Matchers are independent, pure, and registered as an ordered list behind
//! one interface; the first matcher that fires wins. Reordering or adding a
//! matcher is a registry change, not a call-site change.

mod generic;
mod price;
mod stat;
mod title;

pub use generic::{leading_snippet, GenericMatcher};
pub use price::PriceMatcher;
pub use stat::StatMatcher;
pub use title::TitleMatcher;

use crate::types::Nugget;

/// A single pattern matcher over raw text.
pub trait NuggetMatcher: Send + Sync {
    /// Matcher name, for logging and tests.
    fn name(&self) -> &'static str;

    /// Try to pull a typed fact out of `text`.
    fn extract(&self, text: &str) -> Option<Nugget>;
}

/// Ordered registry of matchers.
pub struct NuggetExtractor {
    matchers: Vec<Box<dyn NuggetMatcher>>,
}

impl NuggetExtractor {
    /// The default matcher order: price, stat, title, then the generic
    /// snippet fallback.
    pub fn new() -> Self {
        Self {
            matchers: vec![
                Box::new(PriceMatcher),
                Box::new(StatMatcher),
                Box::new(TitleMatcher),
                Box::new(GenericMatcher),
            ],
        }
    }

    /// Build from an explicit matcher list.
    pub fn with_matchers(matchers: Vec<Box<dyn NuggetMatcher>>) -> Self {
        Self { matchers }
    }

    /// Run matchers in order; first non-null match wins. `None` only when
    /// the registry is empty or the text defeats every matcher (the default
    /// registry's generic fallback fires on any non-blank text).
    pub fn extract(&self, text: &str) -> Option<Nugget> {
        self.matchers.iter().find_map(|m| m.extract(text))
    }
}

impl Default for NuggetExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NuggetKind;

    #[test]
    fn test_price_beats_stat_in_default_order() {
        let extractor = NuggetExtractor::new();
        let nugget = extractor.extract("SCORE: 99 for $10.00").unwrap();
        assert_eq!(nugget.kind, NuggetKind::Price);
    }

    #[test]
    fn test_generic_fallback_always_fires() {
        let extractor = NuggetExtractor::new();
        let nugget = extractor.extract("just some plain words").unwrap();
        assert_eq!(nugget.kind, NuggetKind::Generic);
    }

    #[test]
    fn test_blank_text_yields_nothing() {
        let extractor = NuggetExtractor::new();
        assert!(extractor.extract("   ").is_none());
    }

    #[test]
    fn test_reordered_registry() {
        let extractor =
            NuggetExtractor::with_matchers(vec![Box::new(StatMatcher), Box::new(PriceMatcher)]);
        let nugget = extractor.extract("SCORE: 99 for $10.00").unwrap();
        assert_eq!(nugget.kind, NuggetKind::Score);
    }
}
