//! Typed errors for the fact-checking library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Most of these errors are
//! recovered locally: a failed search degrades to an empty evidence list, a
//! failed model call becomes an `Error`-status analysis. The pipeline itself
//! always produces a report.

use thiserror::Error;

/// Errors from the language-model oracle and question generation.
#[derive(Debug, Error)]
pub enum OracleError {
    /// HTTP transport failure reaching the model provider
    #[error("model request failed: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Provider returned a non-success status
    #[error("model provider error: {0}")]
    Provider(String),

    /// Provider returned an empty completion
    #[error("model returned an empty response")]
    EmptyResponse,

    /// Rate limit still exceeded after exhausting retries
    #[error("rate limit exceeded after {attempts} attempts")]
    RateLimitExhausted { attempts: u32 },
}

/// Errors from the web and encyclopedia search collaborators.
#[derive(Debug, Error)]
pub enum SearchError {
    /// HTTP transport failure
    #[error("search request failed: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Provider returned a non-success status
    #[error("search provider error: {status}")]
    Provider { status: u16 },
}

/// Result type alias for oracle operations.
pub type OracleResult<T> = std::result::Result<T, OracleError>;

/// Result type alias for search operations.
pub type SearchResult<T> = std::result::Result<T, SearchError>;
