//! Configuration for the fact-checking pipeline.

use serde::{Deserialize, Serialize};

/// Which signal wins when the model supplies both an explicit confidence
/// score and per-source YES/NO votes.
///
/// The pipeline default is explicit-first: a stated score is the more
/// conservative, deterministic signal. Vote-first flips the two tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidencePolicy {
    ExplicitFirst,
    VotesFirst,
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        Self::ExplicitFirst
    }
}

/// Evidence gathering limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatherConfig {
    /// Maximum web search results per question. Default: 5.
    pub max_web_results: usize,

    /// Maximum encyclopedia results per question. Default: 3.
    pub max_encyclopedia_results: usize,
}

impl Default for GatherConfig {
    fn default() -> Self {
        Self {
            max_web_results: 5,
            max_encyclopedia_results: 3,
        }
    }
}

/// Response-parser tunables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Precedence between explicit scores and source-vote ratios.
    pub confidence_policy: ConfidencePolicy,
}

/// Judgment aggregation thresholds.
///
/// The dominant-false threshold is a judgment call inherited from the most
/// complete revision of the aggregator; it is exposed here rather than
/// hard-coded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JudgeConfig {
    /// A single false-like analysis at or above this confidence forces a
    /// FAKE verdict. Default: 0.7.
    pub dominant_false_threshold: f64,

    /// Minimum verified-like ratio for a REAL verdict. Default: 0.6.
    pub real_ratio_threshold: f64,

    /// Minimum average confidence for a REAL verdict. Default: 0.7.
    pub real_confidence_threshold: f64,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            dominant_false_threshold: 0.7,
            real_ratio_threshold: 0.6,
            real_confidence_threshold: 0.7,
        }
    }
}

/// Top-level pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub gather: GatherConfig,
    pub parser: ParserConfig,
    pub judge: JudgeConfig,

    /// Evidence excerpt budget per item when rendering the verification
    /// prompt, in characters. Bounds prompt size. Default: 500.
    pub max_excerpt_chars: usize,

    /// Maximum questions verified concurrently. The upstream oracle and
    /// search providers are rate limited, so this stays small. Output order
    /// always matches question order regardless of this value. Default: 1
    /// (sequential).
    pub concurrency: usize,

    /// Include the source-quality audit in report metadata. Default: true.
    pub audit_sources: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            gather: GatherConfig::default(),
            parser: ParserConfig::default(),
            judge: JudgeConfig::default(),
            max_excerpt_chars: 500,
            concurrency: 1,
            audit_sources: true,
        }
    }
}

impl PipelineConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-question concurrency bound (minimum 1).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set the confidence precedence policy.
    pub fn with_confidence_policy(mut self, policy: ConfidencePolicy) -> Self {
        self.parser.confidence_policy = policy;
        self
    }

    /// Set the dominant-false threshold.
    pub fn with_dominant_false_threshold(mut self, threshold: f64) -> Self {
        self.judge.dominant_false_threshold = threshold;
        self
    }

    /// Disable the source-quality audit.
    pub fn without_source_audit(mut self) -> Self {
        self.audit_sources = false;
        self
    }
}
