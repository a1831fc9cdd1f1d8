//! Deterministic structural checks for Falco rule files
//!
//! This pass runs locally before a rule file is sent to the model for
//! review. It only looks at shape: the document must be a YAML list, every
//! `rule` entry must carry the required fields, and priorities must be one of
//! the eight Falco levels. Macros and lists pass through unchecked.

use serde_yaml::{Mapping, Value};
use std::fmt;
use std::str::FromStr;

/// Fields every `- rule:` entry must define
pub const REQUIRED_RULE_FIELDS: [&str; 4] = ["desc", "condition", "output", "priority"];

/// Falco priority levels, highest to lowest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriorityLevel {
    Emergency,
    Alert,
    Critical,
    Error,
    Warning,
    Notice,
    Informational,
    Debug,
}

impl PriorityLevel {
    /// All levels in canonical order
    pub const ALL: [PriorityLevel; 8] = [
        PriorityLevel::Emergency,
        PriorityLevel::Alert,
        PriorityLevel::Critical,
        PriorityLevel::Error,
        PriorityLevel::Warning,
        PriorityLevel::Notice,
        PriorityLevel::Informational,
        PriorityLevel::Debug,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityLevel::Emergency => "EMERGENCY",
            PriorityLevel::Alert => "ALERT",
            PriorityLevel::Critical => "CRITICAL",
            PriorityLevel::Error => "ERROR",
            PriorityLevel::Warning => "WARNING",
            PriorityLevel::Notice => "NOTICE",
            PriorityLevel::Informational => "INFORMATIONAL",
            PriorityLevel::Debug => "DEBUG",
        }
    }

    /// "EMERGENCY, ALERT, ..., DEBUG"
    pub fn canonical_list() -> String {
        Self::ALL
            .iter()
            .map(PriorityLevel::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriorityLevel {
    type Err = String;

    /// Case-insensitive; the input is uppercased before lookup
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.as_str() == upper)
            .ok_or_else(|| format!("unknown priority level '{}'", s))
    }
}

/// Kind of an entry in a rule file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Rule,
    Macro,
    List,
    Unrecognized,
}

impl EntryKind {
    /// Classify an entry by its discriminating key
    pub fn of(entry: &Value) -> Self {
        match entry.as_mapping() {
            Some(map) if map.contains_key("rule") => EntryKind::Rule,
            Some(map) if map.contains_key("macro") => EntryKind::Macro,
            Some(map) if map.contains_key("list") => EntryKind::List,
            _ => EntryKind::Unrecognized,
        }
    }
}

/// One structural problem found in a rule file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralIssue {
    /// The text is not YAML at all
    Parse(String),
    /// The document parsed but is not a list
    NotASequence,
    MissingField { rule: String, field: &'static str },
    InvalidPriority { value: String },
}

impl fmt::Display for StructuralIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralIssue::Parse(msg) => write!(f, "YAML parse error: {}", msg),
            StructuralIssue::NotASequence => write!(
                f,
                "Rule file must be a top-level sequence (a YAML list starting with '-')"
            ),
            StructuralIssue::MissingField { rule, field } => {
                write!(f, "Rule '{}' missing required field: '{}'", rule, field)
            }
            StructuralIssue::InvalidPriority { value } => write!(
                f,
                "Invalid priority '{}'. Must be one of: {}",
                value,
                PriorityLevel::canonical_list()
            ),
        }
    }
}

/// Outcome of the structural pass, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuralCheckResult {
    pub issues: Vec<StructuralIssue>,
}

impl StructuralCheckResult {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// True when the text could not be parsed at all
    pub fn is_parse_failure(&self) -> bool {
        matches!(self.issues.first(), Some(StructuralIssue::Parse(_)))
    }

    /// Issues rendered as error strings, in order
    pub fn errors(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}

/// Run the structural pass over raw rule-file text
pub fn check_structure(rule_yaml: &str) -> StructuralCheckResult {
    let parsed: Value = match serde_yaml::from_str(rule_yaml) {
        Ok(value) => value,
        Err(e) => {
            return StructuralCheckResult {
                issues: vec![StructuralIssue::Parse(e.to_string())],
            }
        }
    };

    let Some(entries) = parsed.as_sequence() else {
        return StructuralCheckResult {
            issues: vec![StructuralIssue::NotASequence],
        };
    };

    let mut issues = Vec::new();
    for entry in entries {
        if EntryKind::of(entry) != EntryKind::Rule {
            continue;
        }
        if let Some(rule) = entry.as_mapping() {
            check_rule(rule, &mut issues);
        }
    }

    StructuralCheckResult { issues }
}

fn check_rule(rule: &Mapping, issues: &mut Vec<StructuralIssue>) {
    let name = rule
        .get("rule")
        .and_then(scalar_text)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    for field in REQUIRED_RULE_FIELDS {
        if !rule.contains_key(field) {
            issues.push(StructuralIssue::MissingField {
                rule: name.clone(),
                field,
            });
        }
    }

    // Null or empty priorities were already reported as missing or are left
    // to the model
    if let Some(priority) = rule.get("priority").and_then(scalar_text) {
        if !priority.is_empty() && priority.parse::<PriorityLevel>().is_err() {
            issues.push(StructuralIssue::InvalidPriority { value: priority });
        }
    }
}

/// Render a YAML scalar as text; `None` for null and collections
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_RULE: &str = r#"- list: shell_binaries
  items: [bash, sh, zsh]

- macro: container
  condition: (container.id != host)

- rule: Shell spawned in a container
  desc: A shell was spawned inside a container
  condition: spawned_process and container and proc.name in (shell_binaries)
  output: Shell spawned (user=%user.name container=%container.id)
  priority: WARNING
  tags: [container, shell, mitre_execution]
"#;

    #[test]
    fn test_valid_document_is_clean() {
        let result = check_structure(VALID_RULE);
        assert!(result.is_clean(), "unexpected issues: {:?}", result.errors());
    }

    #[test]
    fn test_parse_failure_yields_single_error() {
        let result = check_structure("- rule: broken\n  desc: [unclosed\n  output: x");
        assert_eq!(result.issues.len(), 1);
        assert!(result.is_parse_failure());
        assert!(result.errors()[0].starts_with("YAML parse error:"));
    }

    #[test]
    fn test_mapping_document_is_not_a_sequence() {
        let doc = r#"rule: Not in a list
desc: x
priority: BOGUS
"#;
        let result = check_structure(doc);
        // Per-rule checks do not run, so no priority error
        assert_eq!(result.issues, vec![StructuralIssue::NotASequence]);
        assert!(result.errors()[0].contains("top-level sequence"));
        assert!(!result.is_parse_failure());
    }

    #[test]
    fn test_missing_output_and_priority() {
        let doc = r#"- rule: Write below etc
  desc: Write to /etc
  condition: open_write and fd.directory = /etc
"#;
        let errors = check_structure(doc).errors();
        assert_eq!(
            errors,
            vec![
                "Rule 'Write below etc' missing required field: 'output'".to_string(),
                "Rule 'Write below etc' missing required field: 'priority'".to_string(),
            ]
        );
    }

    #[test]
    fn test_unnamed_rule_reports_unknown() {
        let doc = r#"- rule:
  desc: nameless
  condition: evt.type = execve
  output: out
"#;
        let errors = check_structure(doc).errors();
        assert_eq!(
            errors,
            vec!["Rule 'unknown' missing required field: 'priority'".to_string()]
        );
    }

    #[test]
    fn test_lowercase_priority_is_accepted() {
        let doc = r#"- rule: r
  desc: d
  condition: c
  output: o
  priority: "warning"
"#;
        assert!(check_structure(doc).is_clean());
    }

    #[test]
    fn test_unknown_priority_lists_levels_in_order() {
        let doc = r#"- rule: r
  desc: d
  condition: c
  output: o
  priority: URGENT
"#;
        let errors = check_structure(doc).errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0],
            "Invalid priority 'URGENT'. Must be one of: EMERGENCY, ALERT, CRITICAL, ERROR, \
             WARNING, NOTICE, INFORMATIONAL, DEBUG"
        );
    }

    #[test]
    fn test_numeric_priority_is_rendered() {
        let doc = "- rule: r\n  desc: d\n  condition: c\n  output: o\n  priority: 5\n";
        assert_eq!(
            check_structure(doc).issues,
            vec![StructuralIssue::InvalidPriority {
                value: "5".to_string()
            }]
        );
    }

    #[test]
    fn test_macros_lists_and_junk_are_skipped() {
        let doc = r#"- macro: no_condition_here
- list: no_items
- just a string
- 42
- other: mapping
"#;
        assert!(check_structure(doc).is_clean());
    }

    #[test]
    fn test_issues_keep_document_order() {
        let doc = r#"- rule: first
  condition: c
  output: o
  priority: LOUD
- rule: second
  desc: d
  condition: c
  priority: info
"#;
        let errors = check_structure(doc).errors();
        assert_eq!(errors.len(), 4);
        assert!(errors[0].contains("'first'") && errors[0].contains("'desc'"));
        assert!(errors[1].contains("'LOUD'"));
        assert!(errors[2].contains("'second'") && errors[2].contains("'output'"));
        assert!(errors[3].contains("'info'"));
    }

    #[test]
    fn test_priority_level_from_str() {
        assert_eq!("Critical".parse::<PriorityLevel>(), Ok(PriorityLevel::Critical));
        assert_eq!(PriorityLevel::Informational.to_string(), "INFORMATIONAL");
        assert!("info".parse::<PriorityLevel>().is_err());
    }

    #[test]
    fn test_entry_kind() {
        let doc: Value = serde_yaml::from_str(VALID_RULE).unwrap();
        let kinds: Vec<EntryKind> = doc.as_sequence().unwrap().iter().map(EntryKind::of).collect();
        assert_eq!(kinds, vec![EntryKind::List, EntryKind::Macro, EntryKind::Rule]);
    }
}
