//! Mock LLM provider for testing

use crate::client::{LLMClient, LLMRequest, LLMResponse};
use crate::error::{LLMError, Result};
use crate::provider::LLMProvider;
use async_trait::async_trait;
use std::sync::Mutex;

/// Failure a [`MockProvider`] reports instead of answering
#[derive(Debug, Clone)]
pub enum MockFailure {
    /// Behaves like a provider with a missing or rejected API key
    Authentication(String),
    /// Behaves like a rate limit or network failure
    Upstream(String),
}

impl MockFailure {
    fn to_error(&self) -> LLMError {
        match self {
            MockFailure::Authentication(msg) => LLMError::AuthenticationFailed(msg.clone()),
            MockFailure::Upstream(msg) => LLMError::ApiCallFailed(msg.clone()),
        }
    }
}

/// Mock LLM provider for testing
///
/// Returns a fixed reply and records every request it receives, so tests can
/// assert on prompts, turn order and call counts.
pub struct MockProvider {
    name: String,
    default_response: String,
    failure: Option<MockFailure>,
    requests: Mutex<Vec<LLMRequest>>,
}

impl MockProvider {
    /// Create a new mock provider
    pub fn new() -> Self {
        Self::with_response("Mock LLM response".to_string())
    }

    /// Create with custom default response
    pub fn with_response(response: String) -> Self {
        Self {
            name: "mock".to_string(),
            default_response: response,
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a provider whose every call fails
    pub fn failing(failure: MockFailure) -> Self {
        Self {
            failure: Some(failure),
            ..Self::new()
        }
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<LLMRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|requests| requests.len()).unwrap_or(0)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LLMClient for MockProvider {
    async fn call(&self, request: LLMRequest) -> Result<LLMResponse> {
        let model = request.model.clone();
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        if let Some(failure) = &self.failure {
            return Err(failure.to_error());
        }

        Ok(LLMResponse::new(self.default_response.clone(), model)
            .with_tokens(10)
            .with_finish_reason("end_turn".to_string()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl LLMProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "Mock"
    }
}
