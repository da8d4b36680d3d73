use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_API_BASE: &str = "http://localhost:8000/api/cv";

/// Application configuration loaded from environment variables.
/// Everything has a default so the CLI runs against a local backend as is.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the chat/session service.
    pub api_base: String,
    /// Endpoint that turns an export request into a PDF.
    pub pdf_endpoint: String,
    pub http_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let api_base = env_or("CVCLEAN_API_BASE", DEFAULT_API_BASE)
            .trim_end_matches('/')
            .to_string();
        let pdf_endpoint = std::env::var("CVCLEAN_PDF_ENDPOINT")
            .unwrap_or_else(|_| format!("{api_base}/render/"));

        Ok(Config {
            pdf_endpoint,
            http_timeout: Duration::from_secs(
                env_or("CVCLEAN_HTTP_TIMEOUT_SECS", "60")
                    .parse::<u64>()
                    .context("CVCLEAN_HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            rust_log: env_or("RUST_LOG", "info"),
            api_base,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
