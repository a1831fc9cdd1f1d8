//! REST API type definitions
//!
//! Request and response types for the REST API endpoints.

use falco_studio_llm::studio::ExampleRule;
use falco_studio_llm::{ChatTurn, GenerateRuleRequest, RuleStudio, ValidationFinding};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub studio: Arc<RuleStudio>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Example catalog response
#[derive(Debug, Serialize)]
pub struct ExamplesResponse {
    pub rules: Vec<ExampleRule>,
    pub prompts: Vec<&'static str>,
}

/// Rule generation payload
#[derive(Debug, Deserialize)]
pub struct GenerateRequestPayload {
    /// Natural language description (required)
    pub description: String,

    /// Deployment context (optional)
    #[serde(default)]
    pub context: Option<String>,

    /// Desired priority (optional)
    #[serde(default)]
    pub severity: Option<String>,

    /// Extra tags (optional)
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl From<GenerateRequestPayload> for GenerateRuleRequest {
    fn from(payload: GenerateRequestPayload) -> Self {
        GenerateRuleRequest {
            description: payload.description,
            context: payload.context,
            severity: payload.severity,
            tags: payload.tags.unwrap_or_default(),
        }
    }
}

/// Payload for explain / validate / optimize
#[derive(Debug, Deserialize)]
pub struct RuleYamlPayload {
    pub rule_yaml: String,
}

/// Chat payload
#[derive(Debug, Deserialize)]
pub struct ChatRequestPayload {
    /// New user message
    pub message: String,

    /// Prior turns, oldest first
    #[serde(default)]
    pub history: Option<Vec<ChatTurn>>,
}

/// Chat response
#[derive(Debug, Serialize)]
pub struct ChatResponsePayload {
    pub response: String,
}

/// Response shared by the rule endpoints
#[derive(Debug, Default, Serialize)]
pub struct RuleResponse {
    /// Operation succeeded (for validation: the rule file is valid)
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_yaml: Option<String>,

    /// Explanation text, or the optimization report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,

    /// Quality score from the validation review
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
}

impl RuleResponse {
    pub fn generated(rule_yaml: String) -> Self {
        Self {
            success: true,
            rule_yaml: Some(rule_yaml),
            ..Default::default()
        }
    }

    pub fn explained(explanation: String) -> Self {
        Self {
            success: true,
            explanation: Some(explanation),
            ..Default::default()
        }
    }
}

impl From<ValidationFinding> for RuleResponse {
    fn from(finding: ValidationFinding) -> Self {
        Self {
            success: finding.valid,
            errors: Some(finding.errors),
            warnings: Some(finding.warnings),
            suggestions: Some(finding.suggestions),
            score: Some(finding.score),
            ..Default::default()
        }
    }
}
