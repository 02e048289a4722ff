//! Misinformation-Assessment Pipeline
//!
//! Given a piece of text content, this library decides whether it contains
//! factually checkable claims, generates targeted verification questions,
//! gathers web and encyclopedia evidence per question, has a language model
//! judge each question against that evidence, and aggregates the
//! per-question verdicts into one authenticity judgment with a confidence
//! score.
//!
//! # Design Philosophy
//!
//! **Parse defensively, judge deterministically.**
//!
//! - The model's answer is prose, not a format: the response parser is an
//!   explicit state machine with layered fallbacks, and it never fails.
//! - Collaborators (model, search providers) are seams: traits injected at
//!   construction, mocked in tests, rate-limited at the call boundary.
//! - The caller always gets a well-formed report: total failure becomes a
//!   degraded-confidence verdict with a reason, never an absent result.
//!
//! # Usage
//!
//! ```rust,ignore
//! use factcheck::{Pipeline, OracleQuestionGenerator};
//! use factcheck::traits::{GeminiOracle, TavilySearcher, WikipediaSearcher};
//!
//! let oracle = GeminiOracle::new(gemini_key.clone(), "gemini-1.5-pro");
//! let pipeline = Pipeline::new(
//!     OracleQuestionGenerator::new(GeminiOracle::new(gemini_key, "gemini-1.5-flash")),
//!     oracle,
//!     TavilySearcher::new(tavily_key),
//!     WikipediaSearcher::new(),
//! );
//!
//! let report = pipeline.process("The Eiffel Tower is located in Berlin.").await;
//! println!("{} ({:.2})", report.judgment, report.metadata.confidence_scores.judge);
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Collaborator seams (Oracle, QuestionGenerator, searchers)
//! - [`types`] - Data model (questions, evidence, analyses, judgment, report)
//! - [`pipeline`] - Gather → verify → parse → judge stages and orchestration
//! - [`limiter`] - Rate limiting and backoff for model-provider calls
//! - [`testing`] - Mock collaborators for tests

pub mod error;
pub mod limiter;
pub mod pipeline;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{OracleError, SearchError};
pub use limiter::{CallStats, LimiterConfig, RateLimiter};
pub use pipeline::{
    audit_sources, judge, judge_with_config, parse, parse_with_config, Pipeline, SourceAudit,
};
pub use traits::{
    EncyclopediaHit, EncyclopediaSearcher, GeminiOracle, Oracle, OracleQuestionGenerator,
    QuestionGenerator, TavilySearcher, WebHit, WebSearcher, WikipediaSearcher,
};
pub use types::{
    ConfidencePolicy, ConfidenceScores, EvidenceBundle, EvidenceItem, EvidenceOrigin, FactCheck,
    FactCheckReport, GatherConfig, JudgeConfig, Judgment, ParserConfig, PipelineConfig, Question,
    QuestionSet, ReportMetadata, SourceEvaluation, SourceVerdict, Verdict, VerificationAnalysis,
    VerificationStatus,
};
