//! Falco rule assistance built on top of an LLM client
//!
//! - Structural validation: local shape checks of rule files
//! - Response normalization: fence stripping and JSON verdict decoding
//! - [`RuleStudio`]: generate, explain, validate, optimize and chat
//!
//! # Example - Validation
//! ```no_run
//! use falco_studio_llm::{AnthropicProvider, RuleStudio, RuleStudioConfig};
//! use std::sync::Arc;
//!
//! # async fn example() -> falco_studio_llm::Result<()> {
//! let provider = Arc::new(AnthropicProvider::new(std::env::var("ANTHROPIC_API_KEY").ok()));
//! let studio = RuleStudio::new(provider, RuleStudioConfig::default());
//!
//! let finding = studio.validate("- rule: Shell in container\n  priority: LOUD").await?;
//! for error in &finding.errors {
//!     println!("error: {}", error);
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod prompt_templates;
pub mod response_normalizer;
pub mod rule_studio;
pub mod structural_validator;
pub mod types;

// Re-export main types
pub use catalog::{ExampleRule, EXAMPLE_PROMPTS, EXAMPLE_RULES};
pub use response_normalizer::{decode_validation_record, normalize_prose, normalize_text};
pub use rule_studio::{RuleStudio, RuleStudioConfig};
pub use structural_validator::{
    check_structure, EntryKind, PriorityLevel, StructuralCheckResult, StructuralIssue,
};
pub use types::{GenerateRuleRequest, ValidationFinding};
