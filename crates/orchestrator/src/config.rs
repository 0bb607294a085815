//! Configuration for the responder.

use std::env;

use chat_core::UserId;

use crate::error::OrchestrateError;
use crate::selector::ModelTier;

/// Configuration for [`Responder`](crate::Responder).
#[derive(Debug, Clone)]
pub struct ResponderConfig {
    /// The bot's own user id; drives the mention prefix and the
    /// assistant-role decision during context assembly.
    pub bot_id: UserId,

    /// Display name the bot introduces itself with in the system preamble.
    pub bot_name: String,

    /// Model used for the tier-classification call.
    pub classifier_model: String,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            bot_id: UserId(0),
            bot_name: "assistant".to_string(),
            classifier_model: ModelTier::Nano.as_str().to_string(),
        }
    }
}

impl ResponderConfig {
    /// Create configuration from environment variables.
    ///
    /// Required:
    /// - `BOT_USER_ID` - the bot's own user id
    ///
    /// Optional:
    /// - `BOT_NAME` - display name (default: "assistant")
    /// - `CLASSIFIER_MODEL` - model for the tier-classification call
    ///   (default: the smallest tier)
    pub fn from_env() -> Result<Self, OrchestrateError> {
        let bot_id = env::var("BOT_USER_ID")
            .map_err(|_| OrchestrateError::Configuration("BOT_USER_ID not set".to_string()))
            .and_then(|raw| {
                raw.parse::<u64>().map(UserId).map_err(|_| {
                    OrchestrateError::Configuration(format!(
                        "BOT_USER_ID is not a numeric id: {raw}"
                    ))
                })
            })?;

        let defaults = Self::default();

        Ok(Self {
            bot_id,
            bot_name: env::var("BOT_NAME").unwrap_or(defaults.bot_name),
            classifier_model: env::var("CLASSIFIER_MODEL").unwrap_or(defaults.classifier_model),
        })
    }

    /// Create a new config builder.
    pub fn builder(bot_id: UserId) -> ResponderConfigBuilder {
        ResponderConfigBuilder {
            config: Self {
                bot_id,
                ..Self::default()
            },
        }
    }
}

/// Builder for [`ResponderConfig`].
#[derive(Debug)]
pub struct ResponderConfigBuilder {
    config: ResponderConfig,
}

impl ResponderConfigBuilder {
    /// Set the bot display name.
    pub fn bot_name(mut self, name: impl Into<String>) -> Self {
        self.config.bot_name = name.into();
        self
    }

    /// Set the classifier model.
    pub fn classifier_model(mut self, model: impl Into<String>) -> Self {
        self.config.classifier_model = model.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ResponderConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = ResponderConfig::builder(UserId(42)).build();
        assert_eq!(config.bot_id, UserId(42));
        assert_eq!(config.bot_name, "assistant");
        assert_eq!(config.classifier_model, ModelTier::Nano.as_str());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ResponderConfig::builder(UserId(42))
            .bot_name("quill")
            .classifier_model("gpt-5-mini")
            .build();
        assert_eq!(config.bot_name, "quill");
        assert_eq!(config.classifier_model, "gpt-5-mini");
    }
}
