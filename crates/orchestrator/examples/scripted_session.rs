//! Run one response cycle against scripted collaborators.
//!
//! Usage:
//!   cargo run -p orchestrator --example scripted_session

use std::sync::Arc;

use chat_core::{
    Author, ChannelId, ChannelInfo, ChatMessage, CompletionOutput, MessageId, ToolCall, UserId,
};
use chrono::DateTime;
use mock_chat::{MockGateway, ScriptedCompletion, StaticFetcher};
use orchestrator::{Responder, ResponderConfig, GET_MESSAGES_TOOL};
use serde_json::json;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let bot = UserId(42);
    let channel = ChannelInfo::guild(ChannelId(5), "general", "rustaceans");

    let gateway = Arc::new(MockGateway::new());
    gateway
        .seed((1..=10).map(|i| {
            ChatMessage::new(
                MessageId(i),
                Author::user(UserId(1), "ada"),
                channel.clone(),
                format!("earlier message {i}"),
                DateTime::from_timestamp(i as i64 * 100, 0).expect("valid timestamp"),
            )
        }))
        .await;

    // Script: pick the smallest tier, ask for older history once, answer
    let completion = Arc::new(ScriptedCompletion::new());
    completion.push_parse(json!({"model": "gpt-5-nano"})).await;
    completion
        .push_create(CompletionOutput {
            text: String::new(),
            tool_calls: vec![ToolCall {
                id: "call-1".to_string(),
                name: GET_MESSAGES_TOOL.to_string(),
                arguments: json!({"limit": 5}),
            }],
        })
        .await;
    completion
        .push_create(CompletionOutput::from_text(
            "You were talking about earlier messages 1 through 10.",
        ))
        .await;

    let responder = Responder::new(
        gateway.clone(),
        completion,
        Arc::new(StaticFetcher::new()),
        ResponderConfig::builder(bot).bot_name("quill").build(),
    );

    let trigger = ChatMessage::new(
        MessageId(11),
        Author::user(UserId(1), "ada"),
        channel,
        "<@42> what did I miss?",
        DateTime::from_timestamp(1_100, 0).expect("valid timestamp"),
    );

    let handled = responder.handle_message(trigger).await;
    println!("handled: {handled:?}");

    for outbound in gateway.outbound().await {
        println!("outbound: {outbound:?}");
    }
}
