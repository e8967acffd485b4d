use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::AppConfig;
use crate::web::models::PromptMessage;

// Fixed generation parameters; the service exposes no per-request knobs.
pub const MAX_TOKENS: u32 = 256;
pub const TEMPERATURE: f32 = 0.2;

/// Provider-side failure, before any HTTP mapping.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("inference call exceeded the timeout budget")]
    Timeout,
    #[error("inference call failed: {0}")]
    Upstream(String),
}

/// Narrow seam over the inference provider so tests can substitute a fake
/// without network access.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn generate(&self, messages: &[PromptMessage]) -> Result<String, GenerateError>;
}

/// Hugging Face inference client, talking to the OpenAI-compatible
/// chat_completions endpoint.
pub struct HfClient {
    endpoint: String,
    api_token: String,
    model_id: String,
    client: Client,
}

impl HfClient {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        // The timeout is set on the client, so every request carries the
        // same 40s budget.
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            endpoint: format!(
                "{}/chat/completions",
                config.api_base_url.trim_end_matches('/')
            ),
            api_token: config.hf_api_token.clone(),
            model_id: config.model_id.clone(),
            client,
        })
    }
}

#[async_trait]
impl ChatModel for HfClient {
    async fn generate(&self, messages: &[PromptMessage]) -> Result<String, GenerateError> {
        let payload = json!({
            "model": self.model_id,
            "messages": messages,
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
        });
        debug!("Payload: {}", payload);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .json(&payload)
            .send()
            .await
            .map_err(classify)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::Upstream(format!(
                "API request failed with status {status}: {body}"
            )));
        }

        let body: Value = response.json().await.map_err(classify)?;
        debug!("Response JSON: {}", body);

        extract_reply(&body)
    }
}

fn classify(err: reqwest::Error) -> GenerateError {
    if err.is_timeout() {
        GenerateError::Timeout
    } else {
        GenerateError::Upstream(err.to_string())
    }
}

/// Pulls the text of the first choice out of a chat_completions response.
/// A response with no choices or null content is an upstream contract
/// violation, reported as such rather than assumed away.
fn extract_reply(body: &Value) -> Result<String, GenerateError> {
    body.get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            GenerateError::Upstream("no generated choice in provider response".to_string())
        })
}
