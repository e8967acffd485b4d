use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_MODEL_ID: &str = "meta-llama/Meta-Llama-3-8B-Instruct";
pub const DEFAULT_API_BASE_URL: &str = "https://router.huggingface.co/v1";

// Single attempt, all-or-nothing: a provider call either finishes within
// this budget or the request fails with 504.
const REQUEST_TIMEOUT_SECS: u64 = 40;

/// Process-wide configuration, read once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub hf_api_token: String,
    pub model_id: String,
    pub api_base_url: String,
    pub timeout: Duration,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    /// Builds the configuration from environment variables.
    ///
    /// Fails when `HF_API_TOKEN` is absent; everything else has a default.
    pub fn from_env() -> Result<Self> {
        let hf_api_token = env::var("HF_API_TOKEN")
            .context("HF_API_TOKEN is not set in environment variables")?;

        let model_id =
            env::var("HF_MODEL_ID").unwrap_or_else(|_| DEFAULT_MODEL_ID.to_string());

        let api_base_url =
            env::var("HF_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8000);

        Ok(Self {
            hf_api_token,
            model_id,
            api_base_url,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            host,
            port,
        })
    }
}
