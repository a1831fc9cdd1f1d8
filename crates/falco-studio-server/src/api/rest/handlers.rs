//! API endpoint handlers
//!
//! HTTP request handlers for all REST API endpoints.

use super::extractors::JsonExtractor;
use super::types::*;
use crate::error::ServerError;
use axum::{extract::State, Json};
use falco_studio_llm::studio::{EXAMPLE_PROMPTS, EXAMPLE_RULES};
use falco_studio_llm::GenerateRuleRequest;
use tracing::info;

/// Health check endpoint
pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "Falco Rule Studio".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Example rules and prompts for the UI
pub(super) async fn examples() -> Json<ExamplesResponse> {
    Json(ExamplesResponse {
        rules: EXAMPLE_RULES.to_vec(),
        prompts: EXAMPLE_PROMPTS.to_vec(),
    })
}

/// Turn a natural language description into a Falco rule file
pub(super) async fn generate(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<GenerateRequestPayload>,
) -> Result<Json<RuleResponse>, ServerError> {
    info!("Received generate request");
    let request: GenerateRuleRequest = payload.into();
    let rule_yaml = state.studio.generate(&request).await?;
    Ok(Json(RuleResponse::generated(rule_yaml)))
}

/// Explain a rule file in plain language
pub(super) async fn explain(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<RuleYamlPayload>,
) -> Result<Json<RuleResponse>, ServerError> {
    info!("Received explain request ({} bytes)", payload.rule_yaml.len());
    let explanation = state.studio.explain(&payload.rule_yaml).await?;
    Ok(Json(RuleResponse::explained(explanation)))
}

/// Validate a rule file
pub(super) async fn validate(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<RuleYamlPayload>,
) -> Result<Json<RuleResponse>, ServerError> {
    info!("Received validate request ({} bytes)", payload.rule_yaml.len());
    let finding = state.studio.validate(&payload.rule_yaml).await?;
    info!(
        "Validation finished: valid={}, {} error(s), score={}",
        finding.valid,
        finding.errors.len(),
        finding.score
    );
    Ok(Json(finding.into()))
}

/// Optimize a rule file; the report lands in `explanation`
pub(super) async fn optimize(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<RuleYamlPayload>,
) -> Result<Json<RuleResponse>, ServerError> {
    info!("Received optimize request ({} bytes)", payload.rule_yaml.len());
    let report = state.studio.optimize(&payload.rule_yaml).await?;
    Ok(Json(RuleResponse::explained(report)))
}

/// One turn of the Falco assistant chat
pub(super) async fn chat(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<ChatRequestPayload>,
) -> Result<Json<ChatResponsePayload>, ServerError> {
    let history = payload.history.unwrap_or_default();
    info!("Received chat message with {} prior turn(s)", history.len());
    let response = state.studio.chat(&payload.message, &history).await?;
    Ok(Json(ChatResponsePayload { response }))
}
