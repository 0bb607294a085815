//! Error types for collaborator calls.
//!
//! Expected external-call failures are carried as values and checked at
//! each call site; nothing in the workspace panics on a failed gateway or
//! completion call.

use thiserror::Error;

/// Errors from the chat gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// The gateway rejected the request.
    #[error("gateway rejected the request: {0}")]
    Rejected(String),

    /// An attachment's bytes could not be fetched.
    #[error("attachment fetch failed: {0}")]
    Attachment(String),
}

/// Errors from the completion service.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Client-side configuration problem.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// The service returned a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CompletionError::Api {
            status: 429,
            message: "rate limited".to_string(),
        };
        assert_eq!(err.to_string(), "API error (429): rate limited");

        let err = GatewayError::Network("connection reset".to_string());
        assert_eq!(err.to_string(), "network error: connection reset");
    }
}
