//! Anthropic provider implementation

use crate::client::{LLMClient, LLMRequest, LLMResponse};
use crate::error::{LLMError, Result};
use crate::provider::LLMProvider;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Messages API provider
pub struct AnthropicProvider {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider
    ///
    /// A missing or blank key is accepted here; calls then fail with
    /// [`LLMError::AuthenticationFailed`] without touching the network.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Point the provider at a different API root (proxies, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Whether an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn build_body(request: &LLMRequest) -> Value {
        let messages: Vec<Value> = request
            .messages
            .iter()
            .map(|turn| {
                json!({
                    "role": turn.role.as_str(),
                    "content": turn.content,
                })
            })
            .collect();

        let mut body = json!({
            "model": request.model,
            "messages": messages,
            "max_tokens": request.max_tokens.unwrap_or(2048),
        });

        if let Some(system) = &request.system {
            body["system"] = json!(system);
        }
        if let Some(temperature) = request.temperature {
            body["temperature"] = json!(temperature);
        }

        body
    }

    /// Pull the first text block out of a Messages API response
    fn parse_response(resp_json: &Value, model: &str) -> Result<LLMResponse> {
        let content_blocks = resp_json["content"]
            .as_array()
            .ok_or_else(|| LLMError::InvalidResponse("No content in response".to_string()))?;

        let text = content_blocks
            .iter()
            .find(|block| block["type"].as_str() == Some("text"))
            .and_then(|block| block["text"].as_str())
            .ok_or_else(|| LLMError::InvalidResponse("No text block in response".to_string()))?;

        let finish_reason = resp_json["stop_reason"]
            .as_str()
            .unwrap_or("end_turn")
            .to_string();

        let usage = |key: &str| {
            let count = resp_json["usage"][key].as_u64().unwrap_or(0);
            u32::try_from(count).unwrap_or(u32::MAX)
        };
        let tokens_used = usage("input_tokens").saturating_add(usage("output_tokens"));

        Ok(LLMResponse::new(text.to_string(), model.to_string())
            .with_tokens(tokens_used)
            .with_finish_reason(finish_reason))
    }
}

#[async_trait]
impl LLMClient for AnthropicProvider {
    async fn call(&self, request: LLMRequest) -> Result<LLMResponse> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            LLMError::AuthenticationFailed("ANTHROPIC_API_KEY is not set".to_string())
        })?;

        let body = Self::build_body(&request);
        debug!(
            "Calling Anthropic model {} with {} turn(s)",
            request.model,
            request.messages.len()
        );

        let resp = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let resp_text = resp.text().await.map_err(|e| {
            LLMError::ApiCallFailed(format!("Failed to read response: {}", e))
        })?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(LLMError::AuthenticationFailed(format!(
                "Anthropic API rejected credentials ({}): {}",
                status, resp_text
            )));
        }

        if !status.is_success() {
            return Err(LLMError::ApiCallFailed(format!(
                "Anthropic API error ({}): {}",
                status, resp_text
            )));
        }

        let resp_json: Value = serde_json::from_str(&resp_text).map_err(|e| {
            LLMError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        Self::parse_response(&resp_json, &request.model)
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}

impl LLMProvider for AnthropicProvider {
    fn provider_name(&self) -> &str {
        "Anthropic"
    }
}
