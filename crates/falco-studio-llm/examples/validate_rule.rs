//! Example: run the local structural checks and a (mocked) model review
//!
//! Run with:
//! ```bash
//! cargo run --example validate_rule
//! ```

use falco_studio_llm::{check_structure, MockProvider, RuleStudio, RuleStudioConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Falco Rule Studio Validation Example ===\n");

    let rule_yaml = r#"- rule: Shell spawned in a container
  desc: A shell was spawned inside a container
  condition: spawned_process and container and proc.name in (bash, sh)
  priority: URGENT"#;

    // Structural checks need no model at all
    println!("Structural issues:");
    for error in check_structure(rule_yaml).errors() {
        println!("  - {}", error);
    }

    // MockProvider stands in for AnthropicProvider so no API key is needed
    let verdict = r#"```json
{"valid": true, "errors": [], "warnings": ["condition matches every shell"], "suggestions": ["exclude known entrypoints"], "score": 70}
```"#;
    let provider = Arc::new(MockProvider::with_response(verdict.to_string()));
    let studio = RuleStudio::new(provider, RuleStudioConfig::default());

    let finding = studio.validate(rule_yaml).await?;
    println!("\nMerged verdict (valid = {}, score = {}):", finding.valid, finding.score);
    for error in &finding.errors {
        println!("  error: {}", error);
    }
    for warning in &finding.warnings {
        println!("  warning: {}", warning);
    }
    for suggestion in &finding.suggestions {
        println!("  suggestion: {}", suggestion);
    }

    Ok(())
}
