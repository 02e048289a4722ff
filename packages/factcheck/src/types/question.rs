//! Verification questions.

use serde::{Deserialize, Serialize};

/// A single fact-verification question, immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text.
    #[serde(rename = "question")]
    pub text: String,

    /// The claim this question targets, when the generator surfaced one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub claim: Option<String>,
}

impl Question {
    /// Create a question from its text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            claim: None,
        }
    }

    /// Attach the source claim.
    pub fn with_claim(mut self, claim: impl Into<String>) -> Self {
        self.claim = Some(claim.into());
        self
    }
}

/// Outcome of question generation.
///
/// The generator either produces questions or signals that the content has
/// nothing checkable in it. The pipeline special-cases the sentinel and skips
/// verification and judgment entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionSet {
    /// Questions to verify, in generation order.
    Questions(Vec<Question>),

    /// The content is subjective, unverifiable, or too vague to check.
    NotEnoughContext,
}

impl QuestionSet {
    /// Build from raw question strings, dropping empty lines.
    pub fn from_lines(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let questions: Vec<Question> = lines
            .into_iter()
            .map(Into::into)
            .filter(|l: &String| !l.trim().is_empty())
            .map(Question::new)
            .collect();
        Self::Questions(questions)
    }
}
