//! Server error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use falco_studio_llm::LLMError;
use serde_json::json;
use thiserror::Error;

/// Message returned when the provider has no usable credentials
pub const MISSING_CREDENTIALS_HINT: &str = "ANTHROPIC_API_KEY is not set or was rejected. Add it to your .env file or export it as an environment variable.";

/// Server error type
#[derive(Debug, Error)]
pub enum ServerError {
    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Provider credentials missing or rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The LLM provider failed or answered with something unusable
    #[error("Upstream error: {0}")]
    UpstreamError(String),
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServerError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

impl From<LLMError> for ServerError {
    fn from(err: LLMError) -> Self {
        match err {
            LLMError::EmptyInput(_) => ServerError::InvalidRequest(err.to_string()),
            LLMError::AuthenticationFailed(detail) => {
                tracing::warn!("LLM provider authentication failed: {}", detail);
                ServerError::Unauthorized(MISSING_CREDENTIALS_HINT.to_string())
            }
            LLMError::ApiCallFailed(_)
            | LLMError::InvalidResponse(_)
            | LLMError::MalformedModelOutput(_)
            | LLMError::HttpError(_) => ServerError::UpstreamError(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_display() {
        let err = ServerError::InvalidRequest("missing field".to_string());
        assert_eq!(err.to_string(), "Invalid request: missing field");
    }

    #[test]
    fn test_empty_input_maps_to_bad_request() {
        let err: ServerError = LLMError::EmptyInput("Description".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid request: Description cannot be empty");
    }

    #[test]
    fn test_auth_failure_maps_to_unauthorized_with_hint() {
        let err: ServerError = LLMError::AuthenticationFailed("401".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_upstream_failures_keep_message() {
        let err: ServerError = LLMError::ApiCallFailed("Anthropic API error (429)".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert!(err.to_string().contains("429"));

        let err: ServerError = LLMError::MalformedModelOutput("missing field `score`".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert!(err.to_string().contains("missing field `score`"));
    }

    #[test]
    fn test_into_response_status() {
        let response = ServerError::InvalidRequest("bad input".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ServerError::Unauthorized("no key".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = ServerError::UpstreamError("overloaded".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ServerError>();
    }
}
