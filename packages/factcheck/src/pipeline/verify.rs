//! Claim verification: one oracle call per question.
//!
//! Builds the deterministic verification prompt and runs it through the
//! rate-limited oracle. Failures surface as errors here; the orchestrator
//! converts them into `Error`-status analyses so one bad question never
//! aborts the batch.

use tracing::debug;

use crate::error::OracleResult;
use crate::limiter::RateLimiter;
use crate::traits::Oracle;
use crate::types::{EvidenceBundle, Question};

use super::prompts;

/// Ask the oracle to verify one question against the gathered evidence,
/// returning its raw free-text analysis.
pub async fn verify<O: Oracle>(
    oracle: &O,
    limiter: &RateLimiter,
    content: &str,
    question: &Question,
    evidence: &EvidenceBundle,
    max_excerpt_chars: usize,
) -> OracleResult<String> {
    let prompt = prompts::format_verification_prompt(
        content,
        &question.text,
        evidence,
        max_excerpt_chars,
    );

    debug!(
        question = %question.text,
        evidence_items = evidence.len(),
        prompt_chars = prompt.len(),
        "verifying question"
    );

    limiter.call_with_backoff(|| oracle.complete(&prompt)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OracleError;
    use crate::limiter::LimiterConfig;
    use crate::testing::MockOracle;
    use crate::types::EvidenceItem;
    use std::time::Duration;

    fn test_limiter() -> RateLimiter {
        RateLimiter::new(
            "oracle-test",
            LimiterConfig {
                base_delay: Duration::from_millis(1),
                max_retries: 1,
                max_backoff: Duration::from_millis(5),
            },
        )
    }

    #[tokio::test]
    async fn prompt_carries_content_question_and_evidence() {
        let oracle = MockOracle::new().with_default_response("1. Verification Status: Verified");
        let limiter = test_limiter();
        let evidence = EvidenceBundle::from_parts(
            vec![EvidenceItem::web("https://a.com", "the tower is in Paris")],
            vec![],
        );

        let text = verify(
            &oracle,
            &limiter,
            "The Eiffel Tower is in Berlin.",
            &Question::new("Is the Eiffel Tower in Berlin?"),
            &evidence,
            500,
        )
        .await
        .unwrap();

        assert!(text.contains("Verified"));
        let prompts = oracle.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("The Eiffel Tower is in Berlin."));
        assert!(prompts[0].contains("Is the Eiffel Tower in Berlin?"));
        assert!(prompts[0].contains("the tower is in Paris"));
    }

    #[tokio::test]
    async fn oracle_failure_propagates_for_caller_to_fold() {
        let oracle = MockOracle::new().failing();
        let limiter = test_limiter();

        let result = verify(
            &oracle,
            &limiter,
            "content",
            &Question::new("q?"),
            &EvidenceBundle::new(),
            500,
        )
        .await;

        assert!(matches!(result, Err(OracleError::Provider(_))));
    }
}
