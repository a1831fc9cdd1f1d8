//! Falco Rule Studio LLM Integration
//!
//! This crate holds the core of the rule studio:
//! - Structural validation of Falco rule files (no network involved)
//! - Normalization of raw model replies (code fences, JSON records)
//! - Orchestration of the generate / explain / validate / optimize / chat
//!   operations against an injected text-generation client
//!
//! **Note**: the model is only an advisor. Nothing in this crate evaluates
//! rules against live events.

// Re-export core types
pub use client::{ChatTurn, LLMClient, LLMRequest, LLMResponse, Role};
pub use error::{LLMError, Result};

// Re-export providers
pub use provider::{AnthropicProvider, LLMProvider, MockFailure, MockProvider};

// Re-export studio types
pub use studio::{
    check_structure, decode_validation_record, normalize_prose, normalize_text, GenerateRuleRequest,
    PriorityLevel, RuleStudio, RuleStudioConfig, StructuralCheckResult, StructuralIssue,
    ValidationFinding,
};

pub mod client;
pub mod error;
pub mod provider;
pub mod studio;
