//! Application setup: router, CORS, shared state.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use factcheck::traits::{GeminiOracle, TavilySearcher, WikipediaSearcher};
use factcheck::{FactCheckReport, OracleQuestionGenerator, Pipeline};

use crate::config::ServerConfig;

/// The pipeline over live collaborators.
pub type LivePipeline = Pipeline<
    OracleQuestionGenerator<GeminiOracle>,
    GeminiOracle,
    TavilySearcher,
    WikipediaSearcher,
>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<LivePipeline>,
}

/// Wire the live collaborators into a pipeline.
pub fn build_pipeline(config: &ServerConfig) -> LivePipeline {
    let generator = OracleQuestionGenerator::new(GeminiOracle::new(
        config.gemini_api_key.clone(),
        config.generation_model.clone(),
    ));
    let oracle = GeminiOracle::new(
        config.gemini_api_key.clone(),
        config.verification_model.clone(),
    );

    Pipeline::new(
        generator,
        oracle,
        TavilySearcher::new(config.tavily_api_key.clone()),
        WikipediaSearcher::new(),
    )
}

/// Build the router: assessment endpoint, health check, CORS for the local
/// frontend, request tracing.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://localhost:3001"),
        ]))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/process", post(process_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct ContentRequest {
    pub content: String,
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Run one content submission through the pipeline.
///
/// The pipeline never fails outright (even total collaborator failure comes
/// back as a degraded report), so this handler has no error branch.
async fn process_handler(
    State(state): State<AppState>,
    Json(request): Json<ContentRequest>,
) -> Json<FactCheckReport> {
    tracing::info!(chars = request.content.len(), "processing content submission");
    let report = state.pipeline.process(&request.content).await;
    Json(report)
}
