//! Fact-checking HTTP server.
//!
//! Exposes `POST /api/process` taking `{ "content": "..." }` and returning
//! the full assessment report as JSON.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use factcheck_server::{build_pipeline, build_router, AppState, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,factcheck=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let config = ServerConfig::from_env()?;
    let state = AppState {
        pipeline: Arc::new(build_pipeline(&config)),
    };

    let app = build_router(state);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, "fact-checking server listening");
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
