//! Inputs and outputs of the studio operations

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONTEXT: &str = "Kubernetes environment";
pub const DEFAULT_SEVERITY: &str = "WARNING";

/// Input for rule generation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRuleRequest {
    /// Natural language description of the behaviour to detect
    pub description: String,

    /// Deployment context, e.g. "Kubernetes environment", "bare metal"
    #[serde(default)]
    pub context: Option<String>,

    /// Desired Falco priority
    #[serde(default)]
    pub severity: Option<String>,

    /// Extra tags, in order
    #[serde(default)]
    pub tags: Vec<String>,
}

impl GenerateRuleRequest {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = Some(severity.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn context_or_default(&self) -> &str {
        non_blank(self.context.as_deref()).unwrap_or(DEFAULT_CONTEXT)
    }

    pub fn severity_or_default(&self) -> &str {
        non_blank(self.severity.as_deref()).unwrap_or(DEFAULT_SEVERITY)
    }

    /// Tags joined for the prompt
    pub fn tags_text(&self) -> String {
        if self.tags.is_empty() {
            "none specified".to_string()
        } else {
            self.tags.join(", ")
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Validation report for a rule file
///
/// This is also the exact JSON record the model is asked to return; unknown
/// or missing keys make decoding fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationFinding {
    pub valid: bool,
    /// Blocking problems
    pub errors: Vec<String>,
    /// Non-blocking problems
    pub warnings: Vec<String>,
    /// Advisory improvements
    pub suggestions: Vec<String>,
    /// Quality score from the model, 0-100
    pub score: u8,
}

impl ValidationFinding {
    /// Report for a rule file that could not be parsed locally
    pub fn rejected(errors: Vec<String>) -> Self {
        Self {
            valid: false,
            errors,
            warnings: Vec::new(),
            suggestions: Vec::new(),
            score: 0,
        }
    }

    /// Fold local structural errors into a model-produced report.
    ///
    /// Structural errors come first, in their original order, followed by the
    /// model's errors. Any structural error makes the report invalid whatever
    /// the model said.
    pub fn merge_structural(mut self, structural_errors: Vec<String>) -> Self {
        if structural_errors.is_empty() {
            return self;
        }
        let mut errors = structural_errors;
        errors.append(&mut self.errors);
        self.errors = errors;
        self.valid = false;
        self
    }
}
