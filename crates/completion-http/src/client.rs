//! The HTTP completion client.

use chat_core::{
    async_trait, CompletionError, CompletionOutput, CompletionRequest, CompletionService,
    ContentPart, InputTurn, ParseRequest, ToolCall, ToolSpec, TurnContent,
};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::api_types::{
    ApiError, FunctionTool, InputContent, InputItem, OutputContent, OutputItem, ResponsesRequest,
    ResponsesResponse, TextOptions,
};
use crate::config::HttpCompletionConfig;

/// A completion service backed by an OpenAI-compatible responses endpoint.
pub struct HttpCompletion {
    client: Client,
    config: HttpCompletionConfig,
}

impl HttpCompletion {
    /// Create a new client with the given configuration.
    pub fn new(config: HttpCompletionConfig) -> Result<Self, CompletionError> {
        let client = Client::builder().build().map_err(|e| {
            CompletionError::Configuration(format!("failed to create HTTP client: {}", e))
        })?;

        info!("completion client initialized for {}", config.api_url);

        Ok(Self { client, config })
    }

    /// Create a client from environment variables.
    ///
    /// See [`HttpCompletionConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, CompletionError> {
        Self::new(HttpCompletionConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &HttpCompletionConfig {
        &self.config
    }

    /// Issue one request against the responses endpoint.
    async fn post_responses(
        &self,
        request: ResponsesRequest,
    ) -> Result<ResponsesResponse, CompletionError> {
        let url = format!("{}/v1/responses", self.config.api_url);

        debug!(model = %request.model, input_items = request.input.len(), "sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::Network(format!("failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Prefer the structured error message when the body carries one
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                return Err(CompletionError::Api {
                    status: status.as_u16(),
                    message: api_error.error.message,
                });
            }

            return Err(CompletionError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let parsed: ResponsesResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(format!("failed to parse response: {}", e)))?;

        if let Some(ref usage) = parsed.usage {
            debug!(
                "token usage - input: {}, output: {}, total: {}",
                usage.input_tokens, usage.output_tokens, usage.total_tokens
            );
        }

        Ok(parsed)
    }

    fn base_request(&self, model: String, instructions: String, input: Vec<InputTurn>) -> ResponsesRequest {
        ResponsesRequest {
            model,
            instructions,
            input: convert_input(input),
            tools: Vec::new(),
            max_output_tokens: self.config.max_output_tokens,
            temperature: self.config.temperature,
            text: None,
        }
    }
}

#[async_trait]
impl CompletionService for HttpCompletion {
    async fn create(&self, request: CompletionRequest) -> Result<CompletionOutput, CompletionError> {
        let mut body = self.base_request(request.model, request.instructions, request.input);
        body.tools = request.tools.into_iter().map(convert_tool).collect();

        let response = self.post_responses(body).await?;
        Ok(collect_output(response))
    }

    async fn parse(&self, request: ParseRequest) -> Result<Value, CompletionError> {
        let mut body = self.base_request(request.model, request.instructions, request.input);
        body.text = Some(TextOptions::json_schema(request.schema_name, request.schema));

        let response = self.post_responses(body).await?;
        let output = collect_output(response);

        if output.text.is_empty() {
            return Err(CompletionError::InvalidResponse(
                "structured response carried no output text".to_string(),
            ));
        }

        serde_json::from_str(&output.text).map_err(|e| {
            CompletionError::InvalidResponse(format!("output is not valid JSON: {}", e))
        })
    }
}

/// Convert the typed input turns into wire items.
fn convert_input(input: Vec<InputTurn>) -> Vec<InputItem> {
    input
        .into_iter()
        .map(|turn| InputItem {
            role: turn.role.as_str().to_string(),
            content: match turn.content {
                TurnContent::Text(text) => vec![InputContent::InputText { text }],
                TurnContent::Parts(parts) => parts.into_iter().map(convert_part).collect(),
            },
        })
        .collect()
}

fn convert_part(part: ContentPart) -> InputContent {
    match part {
        ContentPart::Text { text } | ContentPart::EmbeddedText { text } => {
            InputContent::InputText { text }
        }
        ContentPart::Image { url, detail } => InputContent::InputImage {
            image_url: url,
            detail: detail.as_str().to_string(),
        },
        ContentPart::File { url } => InputContent::InputFile { file_url: url },
    }
}

fn convert_tool(tool: ToolSpec) -> FunctionTool {
    FunctionTool {
        tool_type: "function".to_string(),
        name: tool.name,
        description: Some(tool.description),
        parameters: tool.parameters,
        strict: tool.strict,
    }
}

/// Fold the response output items into a [`CompletionOutput`].
fn collect_output(response: ResponsesResponse) -> CompletionOutput {
    let mut text = String::new();
    let mut tool_calls = Vec::new();

    for item in response.output {
        match item {
            OutputItem::Message { content } => {
                for part in content {
                    if let OutputContent::OutputText { text: fragment } = part {
                        text.push_str(&fragment);
                    }
                }
            }
            OutputItem::FunctionCall {
                call_id,
                name,
                arguments,
            } => {
                let arguments = serde_json::from_str(&arguments).unwrap_or_else(|e| {
                    warn!("tool call {} carried non-JSON arguments: {}", call_id, e);
                    Value::Null
                });
                tool_calls.push(ToolCall {
                    id: call_id,
                    name,
                    arguments,
                });
            }
            OutputItem::Other => {}
        }
    }

    CompletionOutput { text, tool_calls }
}
