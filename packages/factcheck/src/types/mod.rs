//! Data model for the fact-checking pipeline.
//!
//! Entities flow strictly forward: questions → evidence → parsed analyses →
//! judgment. Nothing here is mutated after its producing stage completes, and
//! nothing is shared across content submissions.

pub mod analysis;
pub mod config;
pub mod evidence;
pub mod judgment;
pub mod question;
pub mod report;

pub use analysis::{
    clamp_confidence, SourceEvaluation, SourceVerdict, VerificationAnalysis, VerificationStatus,
};
pub use config::{ConfidencePolicy, GatherConfig, JudgeConfig, ParserConfig, PipelineConfig};
pub use evidence::{EvidenceBundle, EvidenceItem, EvidenceOrigin};
pub use judgment::{Judgment, Verdict};
pub use question::{Question, QuestionSet};
pub use report::{ConfidenceScores, FactCheck, FactCheckReport, ReportMetadata};
