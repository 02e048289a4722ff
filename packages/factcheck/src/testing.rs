//! Mock collaborators for testing.
//!
//! Deterministic, configurable stand-ins for the oracle, question generator,
//! and both searchers, so pipeline logic can be exercised without real model
//! or network calls. Builders configure scripted responses; call logs
//! support assertions on what the pipeline actually asked for.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{OracleError, OracleResult, SearchError, SearchResult};
use crate::traits::{
    EncyclopediaHit, EncyclopediaSearcher, Oracle, QuestionGenerator, WebHit, WebSearcher,
};
use crate::types::QuestionSet;

/// A mock oracle returning scripted completions.
#[derive(Default)]
pub struct MockOracle {
    /// Responses keyed by a substring the prompt must contain; first match
    /// wins, in insertion order.
    responses: Vec<(String, String)>,

    /// Fallback response when no substring matches.
    default_response: Option<String>,

    /// Fail every call with a provider error.
    fail: bool,

    /// Fail this many calls with a rate-limit error before succeeding.
    rate_limit_failures: Arc<RwLock<u32>>,

    /// Prompts received, for assertions.
    prompts: Arc<RwLock<Vec<String>>>,
}

impl MockOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond with `response` to any prompt containing `prompt_substring`.
    pub fn with_response(
        mut self,
        prompt_substring: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        self.responses
            .push((prompt_substring.into(), response.into()));
        self
    }

    /// Respond with `response` to prompts nothing else matched.
    pub fn with_default_response(mut self, response: impl Into<String>) -> Self {
        self.default_response = Some(response.into());
        self
    }

    /// Fail every call.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Fail the first `count` calls with a rate-limit-class error.
    pub fn with_rate_limit_failures(self, count: u32) -> Self {
        *self.rate_limit_failures.write().unwrap() = count;
        self
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().unwrap().clone()
    }
}

#[async_trait]
impl Oracle for MockOracle {
    async fn complete(&self, prompt: &str) -> OracleResult<String> {
        self.prompts.write().unwrap().push(prompt.to_string());

        if self.fail {
            return Err(OracleError::Provider("mock oracle failure".to_string()));
        }

        {
            let mut remaining = self.rate_limit_failures.write().unwrap();
            if *remaining > 0 {
                *remaining -= 1;
                return Err(OracleError::Provider(
                    "429 rate limit exceeded".to_string(),
                ));
            }
        }

        for (substring, response) in &self.responses {
            if prompt.contains(substring.as_str()) {
                return Ok(response.clone());
            }
        }

        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => Err(OracleError::EmptyResponse),
        }
    }
}

/// A mock question generator with a scripted outcome.
#[derive(Default)]
pub struct MockQuestionGenerator {
    questions: Vec<String>,
    not_enough_context: bool,
    fail: bool,
}

impl MockQuestionGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce these questions for any content.
    pub fn with_questions(
        mut self,
        questions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.questions = questions.into_iter().map(Into::into).collect();
        self
    }

    /// Signal the not-enough-context sentinel.
    pub fn not_enough_context(mut self) -> Self {
        self.not_enough_context = true;
        self
    }

    /// Fail every call.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

#[async_trait]
impl QuestionGenerator for MockQuestionGenerator {
    async fn generate(&self, _content: &str) -> OracleResult<QuestionSet> {
        if self.fail {
            return Err(OracleError::Provider(
                "mock generator failure".to_string(),
            ));
        }
        if self.not_enough_context {
            return Ok(QuestionSet::NotEnoughContext);
        }
        Ok(QuestionSet::from_lines(self.questions.clone()))
    }
}

/// A mock web searcher with per-query scripted hits.
#[derive(Default)]
pub struct MockWebSearcher {
    hits: RwLock<HashMap<String, Vec<WebHit>>>,
    fail: bool,
    queries: Arc<RwLock<Vec<String>>>,
}

impl MockWebSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return these hits for the given query; unknown queries get none.
    pub fn with_hits(self, query: impl Into<String>, hits: Vec<WebHit>) -> Self {
        self.hits.write().unwrap().insert(query.into(), hits);
        self
    }

    /// Fail every call.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Queries received so far.
    pub fn queries(&self) -> Vec<String> {
        self.queries.read().unwrap().clone()
    }
}

#[async_trait]
impl WebSearcher for MockWebSearcher {
    async fn search(&self, query: &str, max_results: usize) -> SearchResult<Vec<WebHit>> {
        self.queries.write().unwrap().push(query.to_string());

        if self.fail {
            return Err(SearchError::Provider { status: 503 });
        }

        let mut hits = self
            .hits
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default();
        hits.truncate(max_results);
        Ok(hits)
    }
}

/// A mock encyclopedia searcher with per-query scripted hits.
#[derive(Default)]
pub struct MockEncyclopediaSearcher {
    hits: RwLock<HashMap<String, Vec<EncyclopediaHit>>>,
    fail: bool,
}

impl MockEncyclopediaSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return these hits for the given query; unknown queries get none.
    pub fn with_hits(self, query: impl Into<String>, hits: Vec<EncyclopediaHit>) -> Self {
        self.hits.write().unwrap().insert(query.into(), hits);
        self
    }

    /// Fail every call.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

#[async_trait]
impl EncyclopediaSearcher for MockEncyclopediaSearcher {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> SearchResult<Vec<EncyclopediaHit>> {
        if self.fail {
            return Err(SearchError::Provider { status: 503 });
        }

        let mut hits = self
            .hits
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default();
        hits.truncate(max_results);
        Ok(hits)
    }
}
