//! The aggregated authenticity judgment.

use serde::{Deserialize, Serialize};

use super::analysis::clamp_confidence;

/// Overall verdict for one content submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Real,
    Fake,
    Misleading,
    Uncertain,
    Error,
}

impl Verdict {
    /// The wire form consumers of the report contract depend on.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Real => "REAL",
            Self::Fake => "FAKE",
            Self::Misleading => "MISLEADING",
            Self::Uncertain => "UNCERTAIN",
            Self::Error => "ERROR",
        }
    }
}

/// Deterministic aggregation of all per-question analyses for one content
/// item. Stateless: recomputed from the analysis list on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    /// The aggregate verdict.
    pub verdict: Verdict,

    /// Confidence in the verdict, always in [0.0, 1.0].
    pub confidence: f64,

    /// Reproducible summary: bucket counts, average confidence, and brief
    /// per-question excerpts.
    pub reason: String,
}

impl Judgment {
    /// Create a judgment, clamping confidence into [0.0, 1.0].
    pub fn new(verdict: Verdict, confidence: f64, reason: impl Into<String>) -> Self {
        Self {
            verdict,
            confidence: clamp_confidence(confidence),
            reason: reason.into(),
        }
    }
}
