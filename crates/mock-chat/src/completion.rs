//! Scripted completion service.

use std::collections::VecDeque;

use async_trait::async_trait;
use chat_core::{
    CompletionError, CompletionOutput, CompletionRequest, CompletionService, ParseRequest,
};
use serde_json::Value;
use tokio::sync::Mutex;

/// A completion service that replays queued responses.
///
/// Every request is recorded before its scripted response is popped, so
/// tests can assert on what the orchestrator actually sent - including
/// which tools were offered on each attempt.
#[derive(Debug, Default)]
pub struct ScriptedCompletion {
    create_script: Mutex<VecDeque<Result<CompletionOutput, CompletionError>>>,
    parse_script: Mutex<VecDeque<Result<Value, CompletionError>>>,
    create_requests: Mutex<Vec<CompletionRequest>>,
    parse_requests: Mutex<Vec<ParseRequest>>,
}

impl ScriptedCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a create response.
    pub async fn push_create(&self, output: CompletionOutput) {
        self.create_script.lock().await.push_back(Ok(output));
    }

    /// Queue a create failure.
    pub async fn push_create_error(&self, error: CompletionError) {
        self.create_script.lock().await.push_back(Err(error));
    }

    /// Queue a parse response.
    pub async fn push_parse(&self, value: Value) {
        self.parse_script.lock().await.push_back(Ok(value));
    }

    /// Queue a parse failure.
    pub async fn push_parse_error(&self, error: CompletionError) {
        self.parse_script.lock().await.push_back(Err(error));
    }

    /// All create requests received, in call order.
    pub async fn create_requests(&self) -> Vec<CompletionRequest> {
        self.create_requests.lock().await.clone()
    }

    /// All parse requests received, in call order.
    pub async fn parse_requests(&self) -> Vec<ParseRequest> {
        self.parse_requests.lock().await.clone()
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn create(&self, request: CompletionRequest) -> Result<CompletionOutput, CompletionError> {
        self.create_requests.lock().await.push(request);
        self.create_script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| {
                Err(CompletionError::InvalidResponse(
                    "no scripted create response left".to_string(),
                ))
            })
    }

    async fn parse(&self, request: ParseRequest) -> Result<Value, CompletionError> {
        self.parse_requests.lock().await.push(request);
        self.parse_script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| {
                Err(CompletionError::InvalidResponse(
                    "no scripted parse response left".to_string(),
                ))
            })
    }
}
