//! LLM provider implementations

use crate::client::LLMClient;

/// LLM provider trait
pub trait LLMProvider: LLMClient {
    /// Get the provider name
    fn provider_name(&self) -> &str;
}

mod anthropic;
mod mock;

pub use anthropic::AnthropicProvider;
pub use mock::{MockFailure, MockProvider};
