//! Cleanup of raw model replies
//!
//! Models like to wrap answers in markdown code fences even when asked not
//! to. Rule text replies lose one leading and one trailing fence; JSON replies
//! are additionally decoded into a [`ValidationFinding`]. Markdown prose is
//! only trimmed, since its fences belong to the answer.

use crate::error::{LLMError, Result};
use crate::studio::types::ValidationFinding;
use regex::Regex;
use std::sync::LazyLock;

/// ```` ``` ```` plus an optional language tag and newline, at the very start
static LEADING_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^```[A-Za-z0-9_+.-]*[ \t]*\r?\n?").expect("leading fence pattern is valid")
});

/// Optional newline plus ```` ``` ```` at the very end
static TRAILING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n?```$").expect("trailing fence pattern is valid"));

/// Strip at most one leading and one trailing code fence and trim.
///
/// Unfenced text only loses surrounding whitespace, so the function is
/// idempotent.
pub fn normalize_text(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_leading = LEADING_FENCE.replace(trimmed, "");
    let without_trailing = TRAILING_FENCE.replace(&without_leading, "");
    without_trailing.trim().to_string()
}

/// Trim a markdown reply (explanations, optimization reports, chat answers).
///
/// Code blocks inside the reply are kept intact, including one that closes
/// the reply.
pub fn normalize_prose(raw: &str) -> String {
    raw.trim().to_string()
}

/// Decode the model's validation verdict.
///
/// The reply must be exactly the `{valid, errors, warnings, suggestions,
/// score}` record, optionally fenced. Anything else is a
/// [`LLMError::MalformedModelOutput`].
pub fn decode_validation_record(raw: &str) -> Result<ValidationFinding> {
    let cleaned = normalize_text(raw);

    let record: ValidationFinding = serde_json::from_str(&cleaned).map_err(|e| {
        LLMError::MalformedModelOutput(format!("validation reply is not the expected JSON record: {}", e))
    })?;

    if record.score > 100 {
        return Err(LLMError::MalformedModelOutput(format!(
            "validation score {} is outside 0-100",
            record.score
        )));
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "- rule: Test\n  desc: Test rule\n  priority: WARNING";

    #[test]
    fn test_strips_yaml_fence() {
        let input = format!("```yaml\n{}\n```", BODY);
        assert_eq!(normalize_text(&input), BODY);
    }

    #[test]
    fn test_strips_bare_fence_and_whitespace() {
        let input = format!("\n  ```\n{}\n```  \n", BODY);
        assert_eq!(normalize_text(&input), BODY);
    }

    #[test]
    fn test_unfenced_text_is_unchanged() {
        assert_eq!(normalize_text(BODY), BODY);
        assert_eq!(normalize_text(&normalize_text(BODY)), BODY);
    }

    #[test]
    fn test_only_outer_fences_are_removed() {
        let input = "### Optimized Rule\n```yaml\n- rule: x\n```\n\n### Changes Made\n- tightened condition";
        assert_eq!(normalize_text(input), input);

        // A fenced reply that itself contains a fence keeps the inner one
        let nested = "```markdown\n```yaml\n- rule: x\n```\n```";
        assert_eq!(normalize_text(nested), "```yaml\n- rule: x\n```");
    }

    #[test]
    fn test_prose_keeps_its_code_blocks() {
        let reply = "\nHere is a rule:\n```yaml\n- rule: x\n  priority: WARNING\n```\n";
        assert_eq!(
            normalize_prose(reply),
            "Here is a rule:\n```yaml\n- rule: x\n  priority: WARNING\n```"
        );

        let fenced = "```markdown\n## What This Rule Does\n```";
        assert_eq!(normalize_prose(fenced), fenced);
    }

    #[test]
    fn test_leading_fence_without_trailing() {
        let input = format!("```yaml\n{}", BODY);
        assert_eq!(normalize_text(&input), BODY);
    }

    #[test]
    fn test_decode_plain_json() {
        let raw = r#"{"valid": true, "errors": [], "warnings": ["w"], "suggestions": ["s"], "score": 85}"#;
        let record = decode_validation_record(raw).unwrap();
        assert!(record.valid);
        assert_eq!(record.warnings, vec!["w"]);
        assert_eq!(record.suggestions, vec!["s"]);
        assert_eq!(record.score, 85);
    }

    #[test]
    fn test_decode_fenced_json() {
        let raw = "```json\n{\"valid\": false, \"errors\": [\"bad field\"], \"warnings\": [], \"suggestions\": [], \"score\": 20}\n```";
        let record = decode_validation_record(raw).unwrap();
        assert!(!record.valid);
        assert_eq!(record.errors, vec!["bad field"]);
    }

    #[test]
    fn test_missing_key_is_malformed() {
        let raw = r#"{"valid": true, "errors": [], "warnings": [], "score": 85}"#;
        let err = decode_validation_record(raw).unwrap_err();
        assert!(matches!(err, LLMError::MalformedModelOutput(_)));
    }

    #[test]
    fn test_extra_or_mistyped_key_is_malformed() {
        let extra = r#"{"valid": true, "errors": [], "warnings": [], "suggestions": [], "score": 85, "notes": "x"}"#;
        assert!(matches!(
            decode_validation_record(extra),
            Err(LLMError::MalformedModelOutput(_))
        ));

        let mistyped = r#"{"valid": "yes", "errors": [], "warnings": [], "suggestions": [], "score": 85}"#;
        assert!(matches!(
            decode_validation_record(mistyped),
            Err(LLMError::MalformedModelOutput(_))
        ));
    }

    #[test]
    fn test_out_of_range_score_is_malformed() {
        let raw = r#"{"valid": true, "errors": [], "warnings": [], "suggestions": [], "score": 150}"#;
        assert!(matches!(
            decode_validation_record(raw),
            Err(LLMError::MalformedModelOutput(_))
        ));
    }

    #[test]
    fn test_prose_is_malformed() {
        let err = decode_validation_record("The rule looks fine to me!").unwrap_err();
        assert!(err.to_string().starts_with("Malformed model output"));
    }
}
