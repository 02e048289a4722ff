//! End-to-end pipeline tests over mock collaborators.
//!
//! These exercise the full flow: question generation → evidence gathering →
//! verification → parsing → judgment → report assembly.

use std::time::Duration;

use factcheck::testing::{
    MockEncyclopediaSearcher, MockOracle, MockQuestionGenerator, MockWebSearcher,
};
use factcheck::traits::{EncyclopediaHit, WebHit};
use factcheck::{LimiterConfig, Pipeline, PipelineConfig, RateLimiter, VerificationStatus};

fn fast_limiter() -> RateLimiter {
    RateLimiter::new(
        "model-test",
        LimiterConfig {
            base_delay: Duration::from_millis(1),
            max_retries: 2,
            max_backoff: Duration::from_millis(10),
        },
    )
}

const EIFFEL_QUESTION: &str = "Is the Eiffel Tower located in Berlin?";

const FALSE_ANALYSIS: &str = r#"1. Verification Status: False
2. Confidence Score: 0.9
3. Supporting Evidence:
- None
4. Contradicting Evidence:
- The Eiffel Tower stands on the Champ de Mars in Paris, France
5. Reasoning: Every source places the tower in Paris, not Berlin.
6. Evidence Gaps:
- None
7. Recommendations:
- None"#;

#[tokio::test]
async fn eiffel_tower_in_berlin_is_judged_fake() {
    let generator = MockQuestionGenerator::new().with_questions([EIFFEL_QUESTION]);
    let oracle = MockOracle::new().with_response(EIFFEL_QUESTION, FALSE_ANALYSIS);
    let web = MockWebSearcher::new().with_hits(
        EIFFEL_QUESTION,
        vec![WebHit::new(
            "https://en.parisinfo.com/eiffel-tower",
            "The Eiffel Tower stands on the Champ de Mars in Paris",
        )],
    );
    let encyclopedia = MockEncyclopediaSearcher::new().with_hits(
        EIFFEL_QUESTION,
        vec![EncyclopediaHit::new(
            "Eiffel Tower",
            "wrought-iron lattice tower on the Champ de Mars in Paris",
        )],
    );

    let pipeline =
        Pipeline::new(generator, oracle, web, encyclopedia).with_limiter(fast_limiter());
    let report = pipeline
        .process("The Eiffel Tower is located in Berlin.")
        .await;

    assert_eq!(report.judgment, "FAKE");
    assert_eq!(report.initial_questions, vec![EIFFEL_QUESTION]);
    assert_eq!(report.fact_checks.len(), 1);

    let analysis = &report.fact_checks[0].analysis;
    assert_eq!(analysis.status, VerificationStatus::False);
    assert!(analysis.confidence >= 0.7);
    assert!(analysis
        .sources
        .contains(&"https://en.parisinfo.com/eiffel-tower".to_string()));
    assert!(analysis.sources.contains(&"Wikipedia".to_string()));
    assert!(report.metadata.confidence_scores.judge >= 0.9);
    assert!(report.metadata.source_audit.is_some());
}

#[tokio::test]
async fn analyses_keep_question_order_under_concurrency() {
    let questions = ["First question?", "Second question?", "Third question?"];

    let mut oracle = MockOracle::new();
    for (i, question) in questions.iter().enumerate() {
        oracle = oracle.with_response(
            *question,
            format!(
                "1. Verification Status: Verified\n\
                 2. Confidence Score: 0.8\n\
                 5. Reasoning: answer number {i}"
            ),
        );
    }

    let pipeline = Pipeline::with_config(
        MockQuestionGenerator::new().with_questions(questions),
        oracle,
        MockWebSearcher::new(),
        MockEncyclopediaSearcher::new(),
        PipelineConfig::default().with_concurrency(3),
    )
    .with_limiter(fast_limiter());

    let report = pipeline.process("content with three claims").await;

    assert_eq!(report.fact_checks.len(), 3);
    for (i, check) in report.fact_checks.iter().enumerate() {
        assert_eq!(check.question.text, questions[i]);
        assert!(check.analysis.reasoning.contains(&format!("number {i}")));
    }
}

#[tokio::test]
async fn not_enough_context_bypasses_verification() {
    let oracle = MockOracle::new().with_default_response("should never be called");

    let pipeline = Pipeline::new(
        MockQuestionGenerator::new().not_enough_context(),
        oracle,
        MockWebSearcher::new(),
        MockEncyclopediaSearcher::new(),
    )
    .with_limiter(fast_limiter());

    let report = pipeline.process("meh, whatever").await;

    assert_eq!(report.judgment, "Not enough context");
    assert!(report.fact_checks.is_empty());
    assert!(report.initial_questions.is_empty());
}

#[tokio::test]
async fn generation_failure_yields_error_report() {
    let pipeline = Pipeline::new(
        MockQuestionGenerator::new().failing(),
        MockOracle::new(),
        MockWebSearcher::new(),
        MockEncyclopediaSearcher::new(),
    )
    .with_limiter(fast_limiter());

    let report = pipeline.process("anything").await;

    assert_eq!(report.judgment, "ERROR");
    assert!(report.judgment_reason.contains("Failed to generate questions"));
    assert_eq!(report.metadata.confidence_scores.judge, 0.0);
}

#[tokio::test]
async fn one_failed_question_degrades_instead_of_aborting() {
    // Two questions verify fine; the third gets no scripted response, which
    // the mock oracle reports as an empty completion.
    let oracle = MockOracle::new()
        .with_response(
            "First?",
            "1. Verification Status: Verified\n2. Confidence Score: 0.9",
        )
        .with_response(
            "Second?",
            "1. Verification Status: Verified\n2. Confidence Score: 0.9",
        );

    let pipeline = Pipeline::new(
        MockQuestionGenerator::new().with_questions(["First?", "Second?", "Third?"]),
        oracle,
        MockWebSearcher::new(),
        MockEncyclopediaSearcher::new(),
    )
    .with_limiter(fast_limiter());

    let report = pipeline.process("content").await;

    assert_eq!(report.fact_checks.len(), 3);
    assert_eq!(
        report.fact_checks[2].analysis.status,
        VerificationStatus::Error
    );
    assert_eq!(report.fact_checks[2].analysis.confidence, 0.0);
    // Judgment still produced over all three.
    assert!(!report.judgment.is_empty());
}

#[tokio::test]
async fn empty_evidence_still_produces_an_analysis() {
    let oracle = MockOracle::new().with_default_response(
        "1. Verification Status: Unable to Verify\n\
         5. Reasoning: No evidence was available to assess the claim.",
    );

    let pipeline = Pipeline::new(
        MockQuestionGenerator::new().with_questions(["Unfindable claim?"]),
        oracle,
        MockWebSearcher::new(),
        MockEncyclopediaSearcher::new(),
    )
    .with_limiter(fast_limiter());

    let report = pipeline.process("obscure content").await;

    let analysis = &report.fact_checks[0].analysis;
    assert_eq!(analysis.status, VerificationStatus::UnableToVerify);
    assert_eq!(
        analysis.sources,
        vec!["Model analysis of the provided content"]
    );
    assert_eq!(report.judgment, "UNCERTAIN");
}

#[tokio::test]
async fn rate_limited_oracle_is_retried_transparently() {
    let oracle = MockOracle::new()
        .with_rate_limit_failures(1)
        .with_default_response(
            "1. Verification Status: Verified\n2. Confidence Score: 0.9",
        );

    let pipeline = Pipeline::new(
        MockQuestionGenerator::new().with_questions(["Only question?"]),
        oracle,
        MockWebSearcher::new(),
        MockEncyclopediaSearcher::new(),
    )
    .with_limiter(fast_limiter());

    let report = pipeline.process("content").await;

    assert_eq!(
        report.fact_checks[0].analysis.status,
        VerificationStatus::Verified
    );
}

#[tokio::test]
async fn report_serializes_to_the_wire_contract() {
    let oracle = MockOracle::new().with_default_response(FALSE_ANALYSIS);

    let pipeline = Pipeline::new(
        MockQuestionGenerator::new().with_questions([EIFFEL_QUESTION]),
        oracle,
        MockWebSearcher::new(),
        MockEncyclopediaSearcher::new(),
    )
    .with_limiter(fast_limiter());

    let report = pipeline.process("The Eiffel Tower is located in Berlin.").await;
    let value = serde_json::to_value(&report).unwrap();

    for field in [
        "initial_questions",
        "fact_checks",
        "judgment",
        "judgment_reason",
        "metadata",
    ] {
        assert!(value.get(field).is_some(), "missing field {field}");
    }
    assert!(value["metadata"]["confidence_scores"]["question_generator"].is_number());
    assert_eq!(value["fact_checks"][0]["analysis"]["status"], "FALSE");
}
