use axum::http::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

/// Failures surfaced by the generation gateway.
#[derive(Debug, Error)]
pub enum IconError {
    /// Missing or invalid input. Nothing was sent to the provider.
    #[error("{0}")]
    Validation(String),
    /// Server is missing its provider credential. Nothing was sent to the provider.
    #[error("{0}")]
    Configuration(String),
    /// A provider call failed; carries the provider's message.
    #[error("{0}")]
    Generation(String),
}

impl IconError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            IconError::Validation(_) => StatusCode::BAD_REQUEST,
            IconError::Configuration(_) | IconError::Generation(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// JSON error envelope returned to clients
    pub fn to_body(&self) -> Value {
        match self {
            IconError::Validation(message) => json!({ "error": message }),
            IconError::Configuration(_) => json!({ "error": "Server configuration error" }),
            IconError::Generation(details) => json!({
                "error": "Failed to generate icons",
                "details": details,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            IconError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            IconError::Configuration("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            IconError::Generation("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_generation_body_carries_details() {
        let body = IconError::Generation("NSFW content detected".into()).to_body();
        assert_eq!(body["error"], "Failed to generate icons");
        assert_eq!(body["details"], "NSFW content detected");
    }

    #[test]
    fn test_configuration_body_hides_internal_message() {
        let body = IconError::Configuration("REPLICATE_API_TOKEN not set".into()).to_body();
        assert_eq!(body["error"], "Server configuration error");
        assert!(body.get("details").is_none());
    }
}
