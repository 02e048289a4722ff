//! The JSON-shaped result record for one content submission.
//!
//! Field names here are the contract external callers (HTTP layer, CLI)
//! depend on; do not rename them without versioning the API.

use serde::{Deserialize, Serialize};

use super::analysis::VerificationAnalysis;
use super::judgment::Judgment;
use super::question::Question;
use crate::pipeline::audit::SourceAudit;

/// One question paired with its verification analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactCheck {
    pub question: Question,
    pub analysis: VerificationAnalysis,
}

/// Per-stage confidence scores surfaced to consumers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceScores {
    pub question_generator: f64,
    pub fact_checking: f64,
    pub judge: f64,
}

/// Report metadata: stage confidences plus the optional source-quality audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub confidence_scores: ConfidenceScores,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source_audit: Option<SourceAudit>,
}

/// The complete assessment for one content submission.
///
/// The pipeline always returns a well-formed report: total failure becomes a
/// degraded-confidence verdict with an explanatory reason, never an absent
/// result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactCheckReport {
    /// Questions the generator produced, in generation order.
    pub initial_questions: Vec<String>,

    /// One entry per question, in the same order as `initial_questions`.
    pub fact_checks: Vec<FactCheck>,

    /// Aggregate verdict (`REAL`/`FAKE`/`MISLEADING`/`UNCERTAIN`/`ERROR`),
    /// or the distinguished `"Not enough context"` sentinel when the content
    /// had nothing checkable.
    pub judgment: String,

    /// Deterministic explanation of the judgment.
    pub judgment_reason: String,

    pub metadata: ReportMetadata,
}

impl FactCheckReport {
    /// Terminal report for content with no checkable claims. Verification
    /// and judgment are bypassed entirely.
    pub fn not_enough_context() -> Self {
        Self {
            initial_questions: Vec::new(),
            fact_checks: Vec::new(),
            judgment: "Not enough context".to_string(),
            judgment_reason: "The content doesn't contain factual claims that can be verified."
                .to_string(),
            metadata: ReportMetadata {
                confidence_scores: ConfidenceScores {
                    question_generator: 0.5,
                    fact_checking: 0.0,
                    judge: 0.5,
                },
                source_audit: None,
            },
        }
    }

    /// Terminal report for a question-generation failure.
    pub fn generation_failure(detail: impl std::fmt::Display) -> Self {
        Self {
            initial_questions: Vec::new(),
            fact_checks: Vec::new(),
            judgment: "ERROR".to_string(),
            judgment_reason: format!("Failed to generate questions: {detail}"),
            metadata: ReportMetadata {
                confidence_scores: ConfidenceScores {
                    question_generator: 0.0,
                    fact_checking: 0.0,
                    judge: 0.0,
                },
                source_audit: None,
            },
        }
    }

    /// Assemble the full report from pipeline outputs.
    pub fn from_results(
        fact_checks: Vec<FactCheck>,
        judgment: &Judgment,
        audit: Option<SourceAudit>,
    ) -> Self {
        let initial_questions = fact_checks
            .iter()
            .map(|fc| fc.question.text.clone())
            .collect::<Vec<_>>();

        Self {
            judgment: judgment.verdict.as_str().to_string(),
            judgment_reason: judgment.reason.clone(),
            metadata: ReportMetadata {
                confidence_scores: ConfidenceScores {
                    question_generator: if initial_questions.is_empty() { 0.0 } else { 0.8 },
                    fact_checking: judgment.confidence,
                    judge: judgment.confidence,
                },
                source_audit: audit,
            },
            initial_questions,
            fact_checks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::analysis::{VerificationAnalysis, VerificationStatus};
    use crate::types::judgment::{Judgment, Verdict};

    #[test]
    fn report_serializes_contract_field_names() {
        let judgment = Judgment::new(Verdict::Fake, 0.9, "one false check");
        let fact_checks = vec![FactCheck {
            question: Question::new("Is the tower in Berlin?"),
            analysis: VerificationAnalysis::new(VerificationStatus::False, 0.9),
        }];

        let report = FactCheckReport::from_results(fact_checks, &judgment, None);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["judgment"], "FAKE");
        assert_eq!(value["judgment_reason"], "one false check");
        assert_eq!(value["initial_questions"][0], "Is the tower in Berlin?");
        assert_eq!(
            value["fact_checks"][0]["question"]["question"],
            "Is the tower in Berlin?"
        );
        assert_eq!(value["fact_checks"][0]["analysis"]["status"], "FALSE");
        assert!(value["metadata"]["confidence_scores"]["judge"].is_number());
    }

    #[test]
    fn sentinel_report_bypasses_judgment() {
        let report = FactCheckReport::not_enough_context();
        assert_eq!(report.judgment, "Not enough context");
        assert!(report.fact_checks.is_empty());
        assert_eq!(report.metadata.confidence_scores.question_generator, 0.5);
    }
}
