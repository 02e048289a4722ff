//! Environment-driven configuration for the server and CLI.

use anyhow::{Context, Result};

/// Keys and knobs loaded from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Google Generative AI key (`GEMINI_API_KEY`).
    pub gemini_api_key: String,

    /// Tavily search key (`TAVILY_API_KEY`).
    pub tavily_api_key: String,

    /// Listen port (`PORT`, default 8000).
    pub port: u16,

    /// Model used for question generation (`GENERATION_MODEL`).
    pub generation_model: String,

    /// Model used for claim verification (`VERIFICATION_MODEL`).
    pub verification_model: String,
}

impl ServerConfig {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let gemini_api_key =
            std::env::var("GEMINI_API_KEY").context("GEMINI_API_KEY is not set")?;
        let tavily_api_key =
            std::env::var("TAVILY_API_KEY").context("TAVILY_API_KEY is not set")?;

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().context("PORT is not a valid port number")?,
            Err(_) => 8000,
        };

        let generation_model = std::env::var("GENERATION_MODEL")
            .unwrap_or_else(|_| "gemini-1.5-flash".to_string());
        let verification_model = std::env::var("VERIFICATION_MODEL")
            .unwrap_or_else(|_| "gemini-1.5-pro".to_string());

        Ok(Self {
            gemini_api_key,
            tavily_api_key,
            port,
            generation_model,
            verification_model,
        })
    }
}
