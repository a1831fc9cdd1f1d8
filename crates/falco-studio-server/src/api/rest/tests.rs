//! Tests for REST API types

#![cfg(test)]

use super::types::*;
use falco_studio_llm::{GenerateRuleRequest, Role, ValidationFinding};

#[test]
fn test_generate_payload_defaults() {
    let payload: GenerateRequestPayload =
        serde_json::from_str(r#"{"description": "Detect crypto miners"}"#).unwrap();
    let request: GenerateRuleRequest = payload.into();

    assert_eq!(request.description, "Detect crypto miners");
    assert!(request.context.is_none());
    assert!(request.tags.is_empty());
    assert_eq!(request.severity_or_default(), "WARNING");
}

#[test]
fn test_generate_payload_null_tags() {
    let payload: GenerateRequestPayload = serde_json::from_str(
        r#"{"description": "d", "context": "bare metal", "severity": "ERROR", "tags": null}"#,
    )
    .unwrap();
    let request: GenerateRuleRequest = payload.into();

    assert_eq!(request.context_or_default(), "bare metal");
    assert_eq!(request.severity_or_default(), "ERROR");
    assert!(request.tags.is_empty());
}

#[test]
fn test_chat_payload_history() {
    let payload: ChatRequestPayload = serde_json::from_str(
        r#"{"message": "next", "history": [
            {"role": "user", "content": "q1"},
            {"role": "assistant", "content": "a1"}
        ]}"#,
    )
    .unwrap();

    let history = payload.history.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[1].role, Role::Assistant);
}

#[test]
fn test_chat_payload_rejects_unknown_role() {
    let result = serde_json::from_str::<ChatRequestPayload>(
        r#"{"message": "next", "history": [{"role": "system", "content": "x"}]}"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_rule_response_skips_empty_fields() {
    let json = serde_json::to_value(RuleResponse::generated("- rule: x".to_string())).unwrap();
    assert_eq!(json, serde_json::json!({"success": true, "rule_yaml": "- rule: x"}));
}

#[test]
fn test_rule_response_from_finding() {
    let finding = ValidationFinding {
        valid: false,
        errors: vec!["e".to_string()],
        warnings: vec![],
        suggestions: vec!["s".to_string()],
        score: 40,
    };

    let json = serde_json::to_value(RuleResponse::from(finding)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "success": false,
            "errors": ["e"],
            "warnings": [],
            "suggestions": ["s"],
            "score": 40
        })
    );
}
