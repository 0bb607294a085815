//! Model tier selection.

use std::fmt;
use std::sync::Arc;

use chat_core::{CompletionService, InputTurn, ParseRequest};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use crate::error::OrchestrateError;

/// The closed set of completion model tiers, smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelTier {
    #[serde(rename = "gpt-5-nano")]
    Nano,
    #[serde(rename = "gpt-5-mini")]
    Mini,
    #[serde(rename = "gpt-5")]
    Standard,
    #[serde(rename = "gpt-5-pro")]
    Flagship,
}

impl ModelTier {
    /// Every tier, smallest first.
    pub const ALL: [ModelTier; 4] = [
        ModelTier::Nano,
        ModelTier::Mini,
        ModelTier::Standard,
        ModelTier::Flagship,
    ];

    /// The model identifier sent to the completion service.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelTier::Nano => "gpt-5-nano",
            ModelTier::Mini => "gpt-5-mini",
            ModelTier::Standard => "gpt-5",
            ModelTier::Flagship => "gpt-5-pro",
        }
    }
}

impl fmt::Display for ModelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected shape of the classification output.
#[derive(Debug, Deserialize)]
struct TierChoice {
    model: ModelTier,
}

/// Picks a model tier with one schema-constrained classification call.
///
/// The call is stateless and never retried: an error or an out-of-enum
/// value aborts the cycle, and the caller reports the reason verbatim.
pub struct ModelSelector<C> {
    completion: Arc<C>,
    classifier_model: String,
}

impl<C: CompletionService> ModelSelector<C> {
    pub fn new(completion: Arc<C>, classifier_model: impl Into<String>) -> Self {
        Self {
            completion,
            classifier_model: classifier_model.into(),
        }
    }

    /// Select a tier for the conversation rendered into `input`.
    pub async fn select(&self, input: Vec<InputTurn>) -> Result<ModelTier, OrchestrateError> {
        let request = ParseRequest {
            model: self.classifier_model.clone(),
            instructions: selection_instructions(),
            input,
            schema_name: "model_choice".to_string(),
            schema: selection_schema(),
        };

        let value = self
            .completion
            .parse(request)
            .await
            .map_err(|e| OrchestrateError::SelectionFailed(e.to_string()))?;

        debug!("tier classification output: {}", value);

        let choice: TierChoice = serde_json::from_value(value)
            .map_err(|e| OrchestrateError::SelectionFailed(format!("invalid tier selection: {}", e)))?;

        info!("selected model tier {}", choice.model);
        Ok(choice.model)
    }
}

/// System instructions for the classification call.
fn selection_instructions() -> String {
    let tiers = ModelTier::ALL
        .iter()
        .map(|tier| tier.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Pick the single best completion model for the conversation that follows. \
         The available models, smallest to largest, are: {tiers}. \
         Prefer the smallest model that can handle the request well; reserve the \
         larger ones for conversations that genuinely need deep reasoning."
    )
}

/// Strict single-property schema listing the tier enum.
fn selection_schema() -> serde_json::Value {
    let ids: Vec<&str> = ModelTier::ALL.iter().map(|tier| tier.as_str()).collect();
    json!({
        "type": "object",
        "properties": {
            "model": {
                "type": "string",
                "enum": ids,
            }
        },
        "required": ["model"],
        "additionalProperties": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::{CompletionError, Role};
    use mock_chat::ScriptedCompletion;

    fn input() -> Vec<InputTurn> {
        vec![InputTurn::text(Role::User, "from:ada\ntime:t\nhi")]
    }

    #[test]
    fn test_tier_ids_round_trip_through_serde() {
        for tier in ModelTier::ALL {
            let value = serde_json::to_value(tier).unwrap();
            assert_eq!(value, json!(tier.as_str()));
            let back: ModelTier = serde_json::from_value(value).unwrap();
            assert_eq!(back, tier);
        }
    }

    #[test]
    fn test_schema_lists_every_tier() {
        let schema = selection_schema();
        let listed = schema["properties"]["model"]["enum"].as_array().unwrap();
        assert_eq!(listed.len(), ModelTier::ALL.len());
        assert_eq!(schema["additionalProperties"], json!(false));
    }

    #[tokio::test]
    async fn test_selects_a_valid_tier() {
        let completion = Arc::new(ScriptedCompletion::new());
        completion.push_parse(json!({"model": "gpt-5-mini"})).await;

        let selector = ModelSelector::new(completion.clone(), "gpt-5-nano");
        let tier = selector.select(input()).await.unwrap();

        assert_eq!(tier, ModelTier::Mini);
        let requests = completion.parse_requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "gpt-5-nano");
        assert_eq!(requests[0].schema_name, "model_choice");
    }

    #[tokio::test]
    async fn test_out_of_enum_value_is_a_hard_error() {
        let completion = Arc::new(ScriptedCompletion::new());
        completion.push_parse(json!({"model": "gpt-999"})).await;

        let selector = ModelSelector::new(completion, "gpt-5-nano");
        let result = selector.select(input()).await;

        match result {
            Err(OrchestrateError::SelectionFailed(msg)) => {
                assert!(msg.contains("invalid tier selection"));
            }
            other => panic!("expected SelectionFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_service_error_carries_the_reason() {
        let completion = Arc::new(ScriptedCompletion::new());
        completion
            .push_parse_error(CompletionError::Api {
                status: 500,
                message: "boom".to_string(),
            })
            .await;

        let selector = ModelSelector::new(completion, "gpt-5-nano");
        match selector.select(input()).await {
            Err(OrchestrateError::SelectionFailed(msg)) => {
                assert_eq!(msg, "API error (500): boom");
            }
            other => panic!("expected SelectionFailed, got {other:?}"),
        }
    }
}
