//! The language-model oracle seam.
//!
//! The pipeline treats the model as an opaque text-completion function:
//! prompt string in, text out or failure. Any failure is equivalent to an
//! empty response as far as the pipeline is concerned; the caller
//! synthesizes an error-status analysis instead of propagating.

use async_trait::async_trait;

use crate::error::{OracleError, OracleResult};

/// Opaque text-completion service.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Complete a prompt. Implementations should return
    /// [`OracleError::EmptyResponse`] rather than an empty string.
    async fn complete(&self, prompt: &str) -> OracleResult<String>;
}

/// Gemini-backed oracle using the generateContent REST endpoint.
pub struct GeminiOracle {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiOracle {
    /// Create an oracle for the given model, e.g. `"gemini-1.5-pro"`.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Oracle for GeminiOracle {
    async fn complete(&self, prompt: &str) -> OracleResult<String> {
        #[derive(serde::Serialize)]
        struct Part<'a> {
            text: &'a str,
        }

        #[derive(serde::Serialize)]
        struct Content<'a> {
            parts: Vec<Part<'a>>,
        }

        #[derive(serde::Serialize)]
        struct Request<'a> {
            contents: Vec<Content<'a>>,
        }

        #[derive(serde::Deserialize)]
        struct Response {
            #[serde(default)]
            candidates: Vec<Candidate>,
        }

        #[derive(serde::Deserialize)]
        struct Candidate {
            content: CandidateContent,
        }

        #[derive(serde::Deserialize)]
        struct CandidateContent {
            #[serde(default)]
            parts: Vec<CandidatePart>,
        }

        #[derive(serde::Deserialize)]
        struct CandidatePart {
            #[serde(default)]
            text: String,
        }

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let request = Request {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| OracleError::Http(Box::new(e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            // Keep the status code in the message so the rate limiter can
            // classify 429-class failures from the text.
            return Err(OracleError::Provider(format!("{status}: {body}")));
        }

        let parsed: Response = response
            .json()
            .await
            .map_err(|e| OracleError::Http(Box::new(e)))?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(OracleError::EmptyResponse);
        }

        Ok(text)
    }
}
