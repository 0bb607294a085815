//! One-shot completion call against a real endpoint.
//!
//! Usage:
//!   COMPLETION_API_KEY=sk-... cargo run -p completion-http --example ask -- "your question"

use chat_core::{CompletionRequest, CompletionService, InputTurn, Role};
use completion_http::HttpCompletion;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let question = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Say hello in one short sentence.".to_string());

    let completion = HttpCompletion::from_env()?;

    let output = completion
        .create(CompletionRequest {
            model: "gpt-5-nano".to_string(),
            instructions: "You are a concise assistant.".to_string(),
            input: vec![InputTurn::text(Role::User, question)],
            tools: Vec::new(),
        })
        .await?;

    println!("{}", output.text);
    Ok(())
}
