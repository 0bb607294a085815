//! Error types for orchestration cycles.

use chat_core::{CompletionError, GatewayError};
use thiserror::Error;

/// Errors that can end a response cycle.
///
/// The two external-service failures are checked at their call sites and
/// surfaced to the user verbatim; everything else is reported as a
/// generic apology so internals never leak into the channel.
#[derive(Debug, Error)]
pub enum OrchestrateError {
    /// Startup configuration problem.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The model-tier classification call failed or returned a value
    /// outside the tier enum. Never retried.
    #[error("model selection failed: {0}")]
    SelectionFailed(String),

    /// A completion call failed; remaining attempts are abandoned.
    #[error("completion error: {0}")]
    Completion(#[from] CompletionError),

    /// A chat gateway call failed.
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// The attempt budget ran out without a terminal answer. Should not
    /// occur: the final attempt withholds the tool.
    #[error("no terminal answer after {0} attempts")]
    Exhausted(usize),
}

/// Text shown to the user when the failure reason is not theirs to see.
pub(crate) const GENERIC_APOLOGY: &str =
    "Sorry, something went wrong while putting together a reply.";

impl OrchestrateError {
    /// The text sent back into the channel for this failure.
    pub fn user_text(&self) -> String {
        match self {
            OrchestrateError::SelectionFailed(message) => message.clone(),
            OrchestrateError::Completion(error) => error.to_string(),
            OrchestrateError::Configuration(_)
            | OrchestrateError::Gateway(_)
            | OrchestrateError::Exhausted(_) => GENERIC_APOLOGY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_and_completion_errors_surface_verbatim() {
        let err = OrchestrateError::SelectionFailed("invalid tier selection".to_string());
        assert_eq!(err.user_text(), "invalid tier selection");

        let err = OrchestrateError::Completion(CompletionError::Api {
            status: 500,
            message: "upstream exploded".to_string(),
        });
        assert_eq!(err.user_text(), "API error (500): upstream exploded");
    }

    #[test]
    fn test_other_errors_surface_an_apology() {
        let err = OrchestrateError::Gateway(GatewayError::Network("reset".to_string()));
        assert_eq!(err.user_text(), GENERIC_APOLOGY);

        let err = OrchestrateError::Exhausted(3);
        assert_eq!(err.user_text(), GENERIC_APOLOGY);
    }
}
