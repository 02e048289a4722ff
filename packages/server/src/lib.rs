//! Fact-checking service: HTTP surface over the [`factcheck`] pipeline.

pub mod app;
pub mod config;

pub use app::{build_pipeline, build_router, AppState, LivePipeline};
pub use config::ServerConfig;
