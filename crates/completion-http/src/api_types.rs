//! Wire types for the responses HTTP endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One item of the request input sequence.
#[derive(Debug, Clone, Serialize)]
pub struct InputItem {
    /// Role: "system", "user", or "assistant".
    pub role: String,
    /// Content parts of this item.
    pub content: Vec<InputContent>,
}

/// A content part inside an input item.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputContent {
    /// A plain text block.
    InputText { text: String },
    /// An image reference.
    InputImage { image_url: String, detail: String },
    /// An opaque file reference.
    InputFile { file_url: String },
}

/// A function tool declaration.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionTool {
    /// Always "function".
    #[serde(rename = "type")]
    pub tool_type: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for the arguments.
    pub parameters: Value,
    pub strict: bool,
}

/// Output text formatting options; carries the JSON schema for
/// structured (parse) requests.
#[derive(Debug, Clone, Serialize)]
pub struct TextOptions {
    pub format: TextFormat,
}

/// A structured-output format constraint.
#[derive(Debug, Clone, Serialize)]
pub struct TextFormat {
    /// Always "json_schema".
    #[serde(rename = "type")]
    pub format_type: String,
    pub name: String,
    pub schema: Value,
    pub strict: bool,
}

impl TextOptions {
    /// Constrain output to a JSON schema.
    pub fn json_schema(name: impl Into<String>, schema: Value) -> Self {
        Self {
            format: TextFormat {
                format_type: "json_schema".to_string(),
                name: name.into(),
                schema,
                strict: true,
            },
        }
    }
}

/// Request body for the responses endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ResponsesRequest {
    pub model: String,
    /// System instructions.
    pub instructions: String,
    pub input: Vec<InputItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<FunctionTool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextOptions>,
}

/// Response body from the responses endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponsesResponse {
    /// Response id.
    pub id: String,
    /// Output items, in emission order.
    pub output: Vec<OutputItem>,
    /// Token usage.
    pub usage: Option<Usage>,
}

/// One output item.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputItem {
    /// An assistant message carrying text content.
    Message { content: Vec<OutputContent> },
    /// A function tool invocation.
    FunctionCall {
        call_id: String,
        name: String,
        /// JSON-encoded arguments.
        arguments: String,
    },
    /// Item kinds this client does not consume (reasoning traces etc.).
    #[serde(other)]
    Other,
}

/// Content inside an output message.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputContent {
    OutputText { text: String },
    #[serde(other)]
    Other,
}

/// Token usage information.
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}

/// API error response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetails,
}

/// API error details.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetails {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_input_content_tags() {
        let parts = vec![
            InputContent::InputText {
                text: "hello".to_string(),
            },
            InputContent::InputImage {
                image_url: "https://cdn.example/a.png".to_string(),
                detail: "auto".to_string(),
            },
            InputContent::InputFile {
                file_url: "https://cdn.example/b.pdf".to_string(),
            },
        ];

        let rendered = serde_json::to_string(&parts).unwrap();
        assert!(rendered.contains(r#""type":"input_text""#));
        assert!(rendered.contains(r#""type":"input_image""#));
        assert!(rendered.contains(r#""type":"input_file""#));
        assert!(rendered.contains(r#""detail":"auto""#));
    }

    #[test]
    fn test_request_omits_empty_tools_and_absent_text() {
        let request = ResponsesRequest {
            model: "gpt-5-nano".to_string(),
            instructions: "be brief".to_string(),
            input: vec![],
            tools: vec![],
            max_output_tokens: None,
            temperature: None,
            text: None,
        };

        let rendered = serde_json::to_string(&request).unwrap();
        assert!(!rendered.contains("tools"));
        assert!(!rendered.contains("max_output_tokens"));
        assert!(!rendered.contains("\"text\""));
    }

    #[test]
    fn test_deserializes_text_and_function_call_output() {
        let body = json!({
            "id": "resp-1",
            "output": [
                {"type": "reasoning", "summary": []},
                {"type": "message", "content": [{"type": "output_text", "text": "hi"}]},
                {"type": "function_call", "call_id": "call-1", "name": "get_messages",
                 "arguments": "{\"limit\": 5}"}
            ],
            "usage": {"input_tokens": 10, "output_tokens": 3, "total_tokens": 13}
        });

        let response: ResponsesResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.output.len(), 3);
        assert!(matches!(response.output[0], OutputItem::Other));
        match &response.output[2] {
            OutputItem::FunctionCall { name, arguments, .. } => {
                assert_eq!(name, "get_messages");
                assert!(arguments.contains("limit"));
            }
            other => panic!("expected function call, got {other:?}"),
        }
        assert_eq!(response.usage.unwrap().total_tokens, 13);
    }

    #[test]
    fn test_json_schema_format() {
        let options = TextOptions::json_schema("tier_choice", json!({"type": "object"}));
        let rendered = serde_json::to_string(&options).unwrap();
        assert!(rendered.contains(r#""type":"json_schema""#));
        assert!(rendered.contains("tier_choice"));
        assert!(rendered.contains(r#""strict":true"#));
    }
}
