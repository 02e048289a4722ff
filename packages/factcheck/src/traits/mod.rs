//! Collaborator seams the pipeline depends on.
//!
//! Each external service is abstracted behind a trait so the pipeline can be
//! exercised hermetically with the mocks in [`crate::testing`].

pub mod generator;
pub mod oracle;
pub mod searcher;

pub use generator::{OracleQuestionGenerator, QuestionGenerator};
pub use oracle::{GeminiOracle, Oracle};
pub use searcher::{
    EncyclopediaHit, EncyclopediaSearcher, TavilySearcher, WebHit, WebSearcher, WikipediaSearcher,
};
