//! Question generation seam.
//!
//! Given raw content, produce the fact-verification questions to check, or
//! signal that the content contains nothing checkable. The sentinel is part
//! of the contract: the pipeline bypasses verification and judgment entirely
//! when it sees it.

use async_trait::async_trait;
use tracing::debug;

use crate::error::OracleResult;
use crate::pipeline::prompts::{self, NOT_ENOUGH_CONTEXT};
use crate::types::{Question, QuestionSet};

use super::oracle::Oracle;

/// Produces verification questions for a piece of content.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Generate questions, or the not-enough-context sentinel.
    ///
    /// An `Err` here is the one failure that aborts the whole pipeline; the
    /// caller turns it into a terminal error report.
    async fn generate(&self, content: &str) -> OracleResult<QuestionSet>;
}

/// Question generator backed by the text-completion oracle.
///
/// Prompts for newline-separated questions and strips any list markers the
/// model adds anyway.
pub struct OracleQuestionGenerator<O: Oracle> {
    oracle: O,
    num_questions: usize,
}

impl<O: Oracle> OracleQuestionGenerator<O> {
    /// Create a generator asking for the default three questions.
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            num_questions: 3,
        }
    }

    /// Set how many questions to request.
    pub fn with_num_questions(mut self, num_questions: usize) -> Self {
        self.num_questions = num_questions.max(1);
        self
    }

    /// Split a completion into questions, dropping markers and blanks.
    fn parse_questions(text: &str) -> Vec<Question> {
        text.lines()
            .map(|line| {
                line.trim()
                    .trim_start_matches(|c: char| {
                        c.is_ascii_digit() || matches!(c, '-' | '*' | '.' | ')')
                    })
                    .trim()
            })
            .filter(|line| !line.is_empty())
            .map(Question::new)
            .collect()
    }
}

#[async_trait]
impl<O: Oracle> QuestionGenerator for OracleQuestionGenerator<O> {
    async fn generate(&self, content: &str) -> OracleResult<QuestionSet> {
        let prompt = prompts::format_question_prompt(content, self.num_questions);
        let text = self.oracle.complete(&prompt).await?;

        if text.to_lowercase().contains(NOT_ENOUGH_CONTEXT) {
            debug!("question generator signalled not enough context");
            return Ok(QuestionSet::NotEnoughContext);
        }

        let questions = Self::parse_questions(&text);
        debug!(count = questions.len(), "generated verification questions");

        if questions.is_empty() {
            return Ok(QuestionSet::NotEnoughContext);
        }

        Ok(QuestionSet::Questions(questions))
    }
}
