//! Completion service interface.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::InputTurn;
use crate::error::CompletionError;

/// A function tool offered to the completion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    /// JSON Schema for the tool arguments.
    pub parameters: Value,
    /// Enforce the schema exactly (no extra properties).
    pub strict: bool,
}

/// A tool invocation requested by the completion service.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    /// Service-assigned call id.
    pub id: String,
    pub name: String,
    pub arguments: Value,
}

/// A free-text ("create") request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    /// System instructions prepended to the input.
    pub instructions: String,
    pub input: Vec<InputTurn>,
    /// Tools offered for this call. An empty list offers none.
    pub tools: Vec<ToolSpec>,
}

/// Result of a create call.
#[derive(Debug, Clone, Default)]
pub struct CompletionOutput {
    /// Concatenated output text; empty if the service produced none.
    pub text: String,
    /// Tool invocations requested by the service, in emission order.
    pub tool_calls: Vec<ToolCall>,
}

impl CompletionOutput {
    /// An output carrying only text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tool_calls: Vec::new(),
        }
    }

    /// A response with no tool calls is a terminal answer.
    pub fn is_terminal(&self) -> bool {
        self.tool_calls.is_empty()
    }
}

/// A schema-constrained ("parse") request.
#[derive(Debug, Clone)]
pub struct ParseRequest {
    pub model: String,
    pub instructions: String,
    pub input: Vec<InputTurn>,
    /// Name reported to the service for the output schema.
    pub schema_name: String,
    /// JSON Schema the output must satisfy.
    pub schema: Value,
}

/// The generative-completion collaborator.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Issue a completion call that may answer in free text or request
    /// tool invocations.
    async fn create(&self, request: CompletionRequest) -> Result<CompletionOutput, CompletionError>;

    /// Issue a completion call whose output is constrained to a JSON
    /// schema. Returns the parsed JSON value.
    async fn parse(&self, request: ParseRequest) -> Result<Value, CompletionError>;
}
