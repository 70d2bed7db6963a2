//! Client for the hosted completion API (Anthropic Messages).

use crate::config::CompletionConfig;
use crate::error::{truncate_body, Error, Result};
use crate::source::USER_AGENT;
use crate::types::{CompletionRequest, CompletionResponse, Prompt};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Something that turns a prompt into generated text
#[async_trait]
pub trait CompletionClient {
    /// Returns the text of the first content segment of the answer
    async fn complete(&self, prompt: &Prompt) -> Result<String>;
}

/// Messages API client. One request per call, no retries.
pub struct MessagesClient {
    client: reqwest::Client,
    config: CompletionConfig,
}

impl MessagesClient {
    pub fn new(config: CompletionConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    fn url(&self) -> String {
        format!("{}/v1/messages", self.config.api_base_url.trim_end_matches('/'))
    }

    pub fn request_for(&self, prompt: &Prompt) -> CompletionRequest {
        CompletionRequest::single_turn(&self.config.model, self.config.max_tokens, prompt)
    }
}

#[async_trait]
impl CompletionClient for MessagesClient {
    async fn complete(&self, prompt: &Prompt) -> Result<String> {
        let request = self.request_for(prompt);
        debug!(
            model = %request.model,
            max_tokens = request.max_tokens,
            prompt_chars = prompt.as_str().chars().count(),
            "requesting completion"
        );

        let response = self
            .client
            .post(self.url())
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let parsed = parse_response(status.as_u16(), &body)?;
        info!(
            model = parsed.model.as_deref().unwrap_or(&request.model),
            stop_reason = parsed.stop_reason.as_deref().unwrap_or("unknown"),
            segments = parsed.content.len(),
            "completion received"
        );

        parsed
            .first_text()
            .map(str::to_string)
            .ok_or(Error::EmptyCompletion)
    }
}

/// Turn a raw HTTP status and body into a response or a typed error
pub fn parse_response(status: u16, body: &str) -> Result<CompletionResponse> {
    if !(200..300).contains(&status) {
        return Err(Error::Api {
            status,
            message: error_message(body),
        });
    }
    Ok(serde_json::from_str(body)?)
}

/// Pull `error.message` out of an error body, falling back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| truncate_body(body))
}
