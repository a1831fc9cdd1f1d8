//! Error types for the rule studio LLM module

use thiserror::Error;

/// Result type alias for LLM operations
pub type Result<T> = std::result::Result<T, LLMError>;

/// LLM module errors
#[derive(Debug, Error)]
pub enum LLMError {
    /// Caller supplied empty or whitespace-only text
    #[error("{0} cannot be empty")]
    EmptyInput(String),

    /// The provider rejected our credentials, or none are configured
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// External API call failed
    #[error("External API call failed: {0}")]
    ApiCallFailed(String),

    /// The provider answered, but the envelope had no usable text
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// The model's reply does not match the shape we asked for
    #[error("Malformed model output: {0}")]
    MalformedModelOutput(String),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl LLMError {
    /// True for failures caused by missing or rejected credentials
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, LLMError::AuthenticationFailed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_display() {
        let err = LLMError::EmptyInput("Description".to_string());
        assert_eq!(err.to_string(), "Description cannot be empty");
    }

    #[test]
    fn test_auth_failure_is_distinguished() {
        assert!(LLMError::AuthenticationFailed("no key".to_string()).is_auth_failure());
        assert!(!LLMError::ApiCallFailed("429".to_string()).is_auth_failure());
        assert!(!LLMError::MalformedModelOutput("bad".to_string()).is_auth_failure());
    }
}
