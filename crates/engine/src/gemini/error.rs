//! Error types for the completion model client.

use thiserror::Error;

/// Errors that can occur when talking to the completion model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned an error.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },

    /// Rate limited by the API.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication failed.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Failed to parse a response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The response contained no candidates.
    #[error("model returned no candidates")]
    NoCandidate,
}

/// API error response envelope.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Nested error details.
    pub error: ApiErrorBody,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorBody {
    /// Numeric status code.
    #[serde(default)]
    pub code: u16,
    /// Error message.
    pub message: String,
    /// Symbolic status (e.g., "INVALID_ARGUMENT").
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_error_display() {
        let err = ModelError::RateLimited(30);
        assert_eq!(err.to_string(), "rate limited, retry after 30 seconds");

        let err = ModelError::Api {
            status: 400,
            message: "invalid request".to_string(),
        };
        assert_eq!(err.to_string(), "API error (400): invalid request");
    }

    #[test]
    fn test_api_error_deserialization() {
        let json = r#"{
            "error": {
                "code": 429,
                "message": "Resource has been exhausted",
                "status": "RESOURCE_EXHAUSTED"
            }
        }"#;

        let response: ApiErrorResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(response.error.code, 429);
        assert_eq!(response.error.status, "RESOURCE_EXHAUSTED");
    }
}
