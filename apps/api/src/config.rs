use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_MODEL;

/// Application configuration loaded from environment variables.
///
/// Only a malformed `PORT` is fatal. A missing rewrite credential leaves the
/// service running with rewriting disabled.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub gemini_api_key: Option<String>,
    pub rewrite_model: String,
    pub rewrite_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            gemini_api_key: optional_env("GEMINI_API_KEY").or_else(|| optional_env("API_KEY")),
            rewrite_model: optional_env("REWRITE_MODEL")
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            rewrite_timeout: Duration::from_secs(
                std::env::var("REWRITE_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse::<u64>()
                    .context("REWRITE_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
        })
    }

    pub fn rewrite_enabled(&self) -> bool {
        self.gemini_api_key.is_some()
    }
}

/// Reads `key`, treating unset and blank values alike.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
