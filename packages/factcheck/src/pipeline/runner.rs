//! Pipeline orchestration.
//!
//! Sequences question generation → per-question evidence gathering,
//! verification, and parsing → one judgment over all analyses. Per-question
//! failures are caught at this boundary and folded into `Error`-status
//! analyses so one bad question never aborts the batch; only question
//! generation can short-circuit the pipeline, and even then the caller gets
//! a well-formed terminal report.

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::limiter::{LimiterConfig, RateLimiter};
use crate::traits::{EncyclopediaSearcher, Oracle, QuestionGenerator, WebSearcher};
use crate::types::{
    EvidenceOrigin, FactCheck, FactCheckReport, PipelineConfig, Question, QuestionSet,
    VerificationAnalysis,
};

use super::audit::audit_sources;
use super::gather::gather;
use super::judge::judge_with_config;
use super::parser::parse_with_config;
use super::verify::verify;

/// Placeholder source when both lookups came back empty.
const NO_SOURCE_PLACEHOLDER: &str = "Model analysis of the provided content";

/// The fact-checking pipeline over injected collaborators.
///
/// Each content submission is independent: questions, evidence, and analyses
/// are local to the call, and nothing is cached across submissions. The only
/// shared state is the rate limiter guarding the model provider.
pub struct Pipeline<Q, O, W, E> {
    generator: Q,
    oracle: O,
    web: W,
    encyclopedia: E,
    config: PipelineConfig,
    oracle_limiter: RateLimiter,
}

impl<Q, O, W, E> Pipeline<Q, O, W, E>
where
    Q: QuestionGenerator,
    O: Oracle,
    W: WebSearcher,
    E: EncyclopediaSearcher,
{
    /// Create a pipeline with default configuration and limiter policy.
    pub fn new(generator: Q, oracle: O, web: W, encyclopedia: E) -> Self {
        Self::with_config(generator, oracle, web, encyclopedia, PipelineConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(
        generator: Q,
        oracle: O,
        web: W,
        encyclopedia: E,
        config: PipelineConfig,
    ) -> Self {
        Self {
            generator,
            oracle,
            web,
            encyclopedia,
            config,
            oracle_limiter: RateLimiter::new("model", LimiterConfig::default()),
        }
    }

    /// Replace the model-provider limiter policy.
    pub fn with_limiter(mut self, limiter: RateLimiter) -> Self {
        self.oracle_limiter = limiter;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Assess one piece of content.
    ///
    /// Always returns a well-formed report: total failure degrades to an
    /// explanatory verdict, never an absent result. Analyses appear in the
    /// original question order regardless of concurrency.
    pub async fn process(&self, content: &str) -> FactCheckReport {
        let question_set = match self
            .oracle_limiter
            .call_with_backoff(|| self.generator.generate(content))
            .await
        {
            Ok(set) => set,
            Err(err) => {
                warn!(error = %err, "question generation failed, returning terminal report");
                return FactCheckReport::generation_failure(err);
            }
        };

        let questions = match question_set {
            QuestionSet::NotEnoughContext => {
                info!("content has no checkable claims, bypassing verification");
                return FactCheckReport::not_enough_context();
            }
            QuestionSet::Questions(questions) if questions.is_empty() => {
                info!("generator produced no questions, bypassing verification");
                return FactCheckReport::not_enough_context();
            }
            QuestionSet::Questions(questions) => questions,
        };

        info!(count = questions.len(), "fact-checking generated questions");

        let fact_checks: Vec<FactCheck> = stream::iter(
            questions
                .into_iter()
                .map(|question| self.check_question(content, question)),
        )
        .buffered(self.config.concurrency.max(1))
        .collect()
        .await;

        let analyses: Vec<VerificationAnalysis> =
            fact_checks.iter().map(|fc| fc.analysis.clone()).collect();

        let judgment = judge_with_config(&analyses, &self.config.judge);
        info!(
            verdict = judgment.verdict.as_str(),
            confidence = judgment.confidence,
            "judgment complete"
        );

        let audit = self.config.audit_sources.then(|| audit_sources(&analyses));

        FactCheckReport::from_results(fact_checks, &judgment, audit)
    }

    /// Run one question through gather → verify → parse.
    ///
    /// Collaborator failures end here: the result is always an analysis,
    /// possibly `Error`-status.
    async fn check_question(&self, content: &str, question: Question) -> FactCheck {
        let evidence = gather(
            &self.web,
            &self.encyclopedia,
            &question.text,
            &self.config.gather,
        )
        .await;

        let analysis = match verify(
            &self.oracle,
            &self.oracle_limiter,
            content,
            &question,
            &evidence,
            self.config.max_excerpt_chars,
        )
        .await
        {
            Ok(raw_text) => {
                let mut analysis =
                    parse_with_config(&raw_text, &question.text, &self.config.parser);
                analysis.sources = assemble_sources(&evidence);
                analysis
            }
            Err(err) => {
                warn!(question = %question.text, error = %err, "verification failed for question");
                VerificationAnalysis::error(format!("Verification failed: {err}"))
            }
        };

        FactCheck { question, analysis }
    }
}

/// Union of evidence locators actually consulted: web URLs in bundle order,
/// a literal "Wikipedia" marker when encyclopedia evidence was present,
/// deduplicated, with a placeholder when nothing was found.
fn assemble_sources(evidence: &crate::types::EvidenceBundle) -> Vec<String> {
    let mut sources: Vec<String> = Vec::new();

    for item in evidence.from_origin(EvidenceOrigin::Web) {
        if !sources.contains(&item.locator) {
            sources.push(item.locator.clone());
        }
    }

    if evidence.has_origin(EvidenceOrigin::Encyclopedia) {
        sources.push("Wikipedia".to_string());
    }

    if sources.is_empty() {
        sources.push(NO_SOURCE_PLACEHOLDER.to_string());
    }

    sources
}
