//! Extracted fact ("nugget") type.

use serde::{Deserialize, Serialize};

/// The kind of fact a nugget carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NuggetKind {
    Price,
    Score,
    Title,
    Generic,
}

/// A short, typed fact pulled out of noisy OCR text.
///
/// Confidences are fixed per matcher, an intentional simplification:
/// the values are tunable constants, not statistically derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nugget {
    #[serde(rename = "type")]
    pub kind: NuggetKind,
    pub value: String,
    pub confidence: f32,
}

impl Nugget {
    pub fn new(kind: NuggetKind, value: impl Into<String>, confidence: f32) -> Self {
        Self {
            kind,
            value: value.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}
