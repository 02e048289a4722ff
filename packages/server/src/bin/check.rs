//! One-shot CLI: fact-check a piece of content and print the report.
//!
//! Usage: `check "The Eiffel Tower is located in Berlin."`

use anyhow::{bail, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use factcheck_server::{build_pipeline, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let content: String = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if content.trim().is_empty() {
        bail!("usage: check <content to fact-check>");
    }

    let config = ServerConfig::from_env()?;
    let pipeline = build_pipeline(&config);

    let report = pipeline.process(&content).await;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
