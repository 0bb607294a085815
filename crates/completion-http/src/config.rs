//! Configuration for the HTTP completion client.

use std::env;

use chat_core::CompletionError;

/// Configuration for [`HttpCompletion`](crate::HttpCompletion).
#[derive(Debug, Clone)]
pub struct HttpCompletionConfig {
    /// Base URL of the completion API.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Maximum tokens the service may generate per call.
    pub max_output_tokens: Option<u32>,

    /// Sampling temperature (0.0 - 2.0).
    pub temperature: Option<f32>,
}

impl Default for HttpCompletionConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com".to_string(),
            api_key: String::new(),
            max_output_tokens: Some(1024),
            temperature: Some(0.7),
        }
    }
}

impl HttpCompletionConfig {
    /// Create configuration from environment variables.
    ///
    /// Required:
    /// - `COMPLETION_API_KEY` - API key for authentication
    ///
    /// Optional:
    /// - `COMPLETION_API_URL` - base URL (default: https://api.openai.com)
    /// - `COMPLETION_MAX_OUTPUT_TOKENS` - max output tokens (default: 1024)
    /// - `COMPLETION_TEMPERATURE` - sampling temperature (default: 0.7)
    pub fn from_env() -> Result<Self, CompletionError> {
        let api_key = env::var("COMPLETION_API_KEY")
            .map_err(|_| CompletionError::Configuration("COMPLETION_API_KEY not set".to_string()))?;

        let api_url = env::var("COMPLETION_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com".to_string());

        let max_output_tokens = env::var("COMPLETION_MAX_OUTPUT_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(1024));

        let temperature = env::var("COMPLETION_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(0.7));

        Ok(Self {
            api_url,
            api_key,
            max_output_tokens,
            temperature,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> HttpCompletionConfigBuilder {
        HttpCompletionConfigBuilder::default()
    }
}

/// Builder for [`HttpCompletionConfig`].
#[derive(Debug, Default)]
pub struct HttpCompletionConfigBuilder {
    config: HttpCompletionConfig,
}

impl HttpCompletionConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API base URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the max output tokens.
    pub fn max_output_tokens(mut self, tokens: u32) -> Self {
        self.config.max_output_tokens = Some(tokens);
        self
    }

    /// Set the sampling temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> HttpCompletionConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpCompletionConfig::default();

        assert_eq!(config.api_url, "https://api.openai.com");
        assert!(config.api_key.is_empty());
        assert_eq!(config.max_output_tokens, Some(1024));
        assert_eq!(config.temperature, Some(0.7));
    }

    #[test]
    fn test_builder_all_options() {
        let config = HttpCompletionConfig::builder()
            .api_key("my-key")
            .api_url("https://custom.api.example")
            .max_output_tokens(512)
            .temperature(0.2)
            .build();

        assert_eq!(config.api_key, "my-key");
        assert_eq!(config.api_url, "https://custom.api.example");
        assert_eq!(config.max_output_tokens, Some(512));
        assert_eq!(config.temperature, Some(0.2));
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_vars() {
            std::env::remove_var("COMPLETION_API_KEY");
            std::env::remove_var("COMPLETION_API_URL");
            std::env::remove_var("COMPLETION_MAX_OUTPUT_TOKENS");
            std::env::remove_var("COMPLETION_TEMPERATURE");
        }

        // Scenario 1: missing API key is a configuration error
        clear_all_vars();
        let result = HttpCompletionConfig::from_env();
        match result {
            Err(CompletionError::Configuration(msg)) => {
                assert!(msg.contains("COMPLETION_API_KEY"));
            }
            other => panic!("expected Configuration error, got {other:?}"),
        }

        // Scenario 2: only API key set, defaults used
        clear_all_vars();
        std::env::set_var("COMPLETION_API_KEY", "test-env-key");

        let config = HttpCompletionConfig::from_env().unwrap();
        assert_eq!(config.api_key, "test-env-key");
        assert_eq!(config.api_url, "https://api.openai.com");
        assert_eq!(config.max_output_tokens, Some(1024));
        assert_eq!(config.temperature, Some(0.7));

        // Scenario 3: all vars set
        clear_all_vars();
        std::env::set_var("COMPLETION_API_KEY", "full-test-key");
        std::env::set_var("COMPLETION_API_URL", "https://test.api.example");
        std::env::set_var("COMPLETION_MAX_OUTPUT_TOKENS", "2048");
        std::env::set_var("COMPLETION_TEMPERATURE", "0.1");

        let config = HttpCompletionConfig::from_env().unwrap();
        assert_eq!(config.api_key, "full-test-key");
        assert_eq!(config.api_url, "https://test.api.example");
        assert_eq!(config.max_output_tokens, Some(2048));
        assert_eq!(config.temperature, Some(0.1));

        // Cleanup
        clear_all_vars();
    }
}
