//! Rule studio operations: generate, explain, validate, optimize, chat

use crate::client::{ChatTurn, LLMClient, LLMRequest};
use crate::error::{LLMError, Result};
use crate::studio::prompt_templates::{
    chat_system_message, generate_prompt, system_message, with_rule_yaml, EXPLAIN_PROMPT,
    OPTIMIZE_PROMPT, VALIDATE_PROMPT,
};
use crate::studio::response_normalizer::{decode_validation_record, normalize_prose, normalize_text};
use crate::studio::structural_validator::check_structure;
use crate::studio::types::{GenerateRuleRequest, ValidationFinding};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Configuration for the rule studio
#[derive(Debug, Clone)]
pub struct RuleStudioConfig {
    /// Model to use (e.g., "claude-sonnet-4-5")
    pub model: String,
    /// Maximum tokens for generate / explain / optimize / chat
    pub max_tokens: u32,
    /// Maximum tokens for the validation verdict
    pub validate_max_tokens: u32,
    /// Temperature (0.0 - 1.0); provider default when unset
    pub temperature: Option<f32>,
}

impl Default for RuleStudioConfig {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-5".to_string(),
            max_tokens: 2048,
            validate_max_tokens: 1024,
            temperature: None,
        }
    }
}

impl RuleStudioConfig {
    /// Create a new configuration with a specific model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Set maximum tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set maximum tokens for validation
    pub fn with_validate_max_tokens(mut self, max_tokens: u32) -> Self {
        self.validate_max_tokens = max_tokens;
        self
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Falco rule assistant backed by an LLM
///
/// Every operation rejects blank input up front and then makes at most one
/// call to the client. Nothing is retried or cached; client failures are
/// returned unchanged.
pub struct RuleStudio {
    client: Arc<dyn LLMClient>,
    config: RuleStudioConfig,
}

impl RuleStudio {
    /// Create a new rule studio
    pub fn new(client: Arc<dyn LLMClient>, config: RuleStudioConfig) -> Self {
        Self { client, config }
    }

    /// Create with default configuration
    pub fn with_defaults(client: Arc<dyn LLMClient>) -> Self {
        Self::new(client, RuleStudioConfig::default())
    }

    /// Get current configuration
    pub fn config(&self) -> &RuleStudioConfig {
        &self.config
    }

    /// Name of the underlying client
    pub fn client_name(&self) -> &str {
        self.client.name()
    }

    /// Generate a Falco rule file from a natural language description
    ///
    /// # Example
    /// ```no_run
    /// use falco_studio_llm::{GenerateRuleRequest, MockProvider, RuleStudio};
    /// use std::sync::Arc;
    ///
    /// # async fn example() -> falco_studio_llm::Result<()> {
    /// let studio = RuleStudio::with_defaults(Arc::new(MockProvider::new()));
    /// let request = GenerateRuleRequest::new("Detect kubectl executed inside a pod")
    ///     .with_severity("NOTICE");
    /// let rule_yaml = studio.generate(&request).await?;
    /// println!("{}", rule_yaml);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn generate(&self, request: &GenerateRuleRequest) -> Result<String> {
        ensure_not_blank(&request.description, "Description")?;

        let prompt = generate_prompt(request);

        info!("Generating rule for: {}", request.description);
        let raw = self
            .complete(vec![ChatTurn::user(prompt)], system_message(), self.config.max_tokens)
            .await?;

        Ok(normalize_text(&raw))
    }

    /// Explain a rule file in plain language
    pub async fn explain(&self, rule_yaml: &str) -> Result<String> {
        ensure_not_blank(rule_yaml, "Rule YAML")?;

        let prompt = with_rule_yaml(EXPLAIN_PROMPT, rule_yaml);
        let raw = self
            .complete(vec![ChatTurn::user(prompt)], system_message(), self.config.max_tokens)
            .await?;

        Ok(normalize_prose(&raw))
    }

    /// Validate a rule file: local structural checks first, then the model's
    /// review, with local errors taking precedence.
    ///
    /// A file that is not YAML at all is reported as invalid straight away,
    /// without calling the model.
    pub async fn validate(&self, rule_yaml: &str) -> Result<ValidationFinding> {
        ensure_not_blank(rule_yaml, "Rule YAML")?;

        let structural = check_structure(rule_yaml);
        if structural.is_parse_failure() {
            warn!("Rule file is not valid YAML, skipping model review");
            return Ok(ValidationFinding::rejected(structural.errors()));
        }
        if !structural.is_clean() {
            debug!("Structural check found {} issue(s)", structural.issues.len());
        }

        let prompt = with_rule_yaml(VALIDATE_PROMPT, rule_yaml);
        let raw = self
            .complete(
                vec![ChatTurn::user(prompt)],
                system_message(),
                self.config.validate_max_tokens,
            )
            .await?;

        let record = decode_validation_record(&raw)?;
        Ok(record.merge_structural(structural.errors()))
    }

    /// Suggest an optimized version of a rule file plus a change summary
    pub async fn optimize(&self, rule_yaml: &str) -> Result<String> {
        ensure_not_blank(rule_yaml, "Rule YAML")?;

        let prompt = with_rule_yaml(OPTIMIZE_PROMPT, rule_yaml);
        let raw = self
            .complete(vec![ChatTurn::user(prompt)], system_message(), self.config.max_tokens)
            .await?;

        Ok(normalize_prose(&raw))
    }

    /// Answer one chat message given the caller's conversation so far.
    ///
    /// History is sent exactly as given, followed by the new message; nothing
    /// is remembered between calls.
    pub async fn chat(&self, message: &str, history: &[ChatTurn]) -> Result<String> {
        ensure_not_blank(message, "Message")?;

        let mut turns = Vec::with_capacity(history.len() + 1);
        turns.extend_from_slice(history);
        turns.push(ChatTurn::user(message));

        let raw = self
            .complete(turns, chat_system_message(), self.config.max_tokens)
            .await?;

        Ok(normalize_prose(&raw))
    }

    async fn complete(&self, turns: Vec<ChatTurn>, system: String, max_tokens: u32) -> Result<String> {
        let request = LLMRequest::from_turns(turns, self.config.model.clone())
            .with_system(system)
            .with_max_tokens(max_tokens)
            .with_temperature(self.config.temperature);

        let response = self.client.call(request).await?;
        debug!(
            "{} answered with {} tokens ({})",
            self.client.name(),
            response.tokens_used,
            response.finish_reason
        );

        Ok(response.content)
    }
}

fn ensure_not_blank(text: &str, what: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(LLMError::EmptyInput(what.to_string()));
    }
    Ok(())
}
