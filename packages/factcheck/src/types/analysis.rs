//! The structured per-question verification analysis.
//!
//! This is the central parsed entity: the free-text model answer is reduced
//! to a closed status enum, a clamped confidence, and typed evidence lists.
//! Constructors enforce the invariants (confidence in [0,1], status never raw
//! text) so downstream code never has to re-validate.

use serde::{Deserialize, Serialize};

/// Closed set of per-question verification outcomes.
///
/// The parser maps unrecognized status text to `UnableToVerify`; `Error` is
/// reserved for hard collaborator failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Verified,
    False,
    PartiallyTrue,
    Misleading,
    Unsubstantiated,
    UnableToVerify,
    Error,
}

impl VerificationStatus {
    /// Human-readable form used in synthesized reasoning and judgment
    /// summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "VERIFIED",
            Self::False => "FALSE",
            Self::PartiallyTrue => "PARTIALLY_TRUE",
            Self::Misleading => "MISLEADING",
            Self::Unsubstantiated => "UNSUBSTANTIATED",
            Self::UnableToVerify => "UNABLE_TO_VERIFY",
            Self::Error => "ERROR",
        }
    }

    /// Whether source YES-votes agree with this status.
    ///
    /// Positive statuses are corroborated by YES votes; `False` is
    /// corroborated by NO votes. Uncertain statuses have no polarity and
    /// count YES votes as agreement.
    pub fn agrees_with_yes(&self) -> bool {
        !matches!(self, Self::False)
    }

    /// Default confidence when the model supplied no usable score and no
    /// source votes were available.
    pub fn default_confidence(&self) -> f64 {
        match self {
            Self::Verified | Self::False => 0.85,
            Self::PartiallyTrue | Self::Misleading => 0.65,
            Self::Unsubstantiated => 0.55,
            Self::UnableToVerify => 0.5,
            Self::Error => 0.0,
        }
    }
}

/// Per-source YES/NO verdict parsed from the optional source-evaluation
/// section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEvaluation {
    /// Source locator as the model named it.
    pub source: String,

    /// Whether the source supports the claim.
    pub verdict: SourceVerdict,

    /// The model's one-line rationale, possibly empty.
    pub reason: String,
}

/// A source either supports the claim or it does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceVerdict {
    Yes,
    No,
}

/// Structured outcome of verifying one question against gathered evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationAnalysis {
    /// Normalized verification status.
    pub status: VerificationStatus,

    /// Certainty in the status, always in [0.0, 1.0].
    pub confidence: f64,

    /// Evidence points supporting the status.
    pub supporting_evidence: Vec<String>,

    /// Evidence points contradicting the status.
    pub contradicting_evidence: Vec<String>,

    /// Step-by-step assessment; non-empty after parsing (backfilled from the
    /// status when the model omitted it).
    pub reasoning: String,

    /// Missing information the model flagged.
    pub evidence_gaps: Vec<String>,

    /// Suggested further checks.
    pub recommendations: Vec<String>,

    /// Deduplicated source locators actually consulted.
    pub sources: Vec<String>,

    /// Per-source YES/NO verdicts, when the model provided them.
    #[serde(default)]
    pub source_evaluations: Vec<SourceEvaluation>,
}

impl VerificationAnalysis {
    /// Create an analysis, clamping confidence into [0.0, 1.0].
    pub fn new(status: VerificationStatus, confidence: f64) -> Self {
        Self {
            status,
            confidence: clamp_confidence(confidence),
            supporting_evidence: Vec::new(),
            contradicting_evidence: Vec::new(),
            reasoning: String::new(),
            evidence_gaps: Vec::new(),
            recommendations: Vec::new(),
            sources: Vec::new(),
            source_evaluations: Vec::new(),
        }
    }

    /// Synthesize the analysis for a hard failure (oracle down, retries
    /// exhausted). Confidence is zero; the reason records what went wrong.
    pub fn error(reason: impl Into<String>) -> Self {
        let mut analysis = Self::new(VerificationStatus::Error, 0.0);
        analysis.reasoning = reason.into();
        analysis
    }

    /// Set the reasoning text.
    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }

    /// Set the deduplicated source list.
    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = sources;
        self
    }

    /// Re-clamp confidence after any direct mutation.
    pub fn set_confidence(&mut self, confidence: f64) {
        self.confidence = clamp_confidence(confidence);
    }

    /// Whether the check produced any substantive output at all.
    ///
    /// Analyses with no evidence points and no reasoning are treated as
    /// unfinished by the source audit fallback.
    pub fn has_substance(&self) -> bool {
        !self.supporting_evidence.is_empty()
            || !self.contradicting_evidence.is_empty()
            || !self.reasoning.is_empty()
    }
}

/// Clamp a confidence value into [0.0, 1.0], mapping NaN to 0.0.
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
