//! Core types and collaborator traits for the chat response orchestrator.
//!
//! This crate defines the shared vocabulary of the workspace:
//!
//! - [`ChatMessage`] / [`Attachment`] - messages as delivered by the chat gateway
//! - [`ConversationHistory`] - the ordered, duplicate-free working history
//! - [`InputTurn`] / [`ContentPart`] - the typed input the completion service consumes
//! - [`ChatGateway`] / [`CompletionService`] / [`AttachmentFetcher`] - the traits
//!   behind which the external collaborators live
//! - [`GatewayError`] / [`CompletionError`] - error types for collaborator calls

mod completion;
mod content;
mod error;
mod gateway;
mod history;
mod message;

pub use completion::{
    CompletionOutput, CompletionRequest, CompletionService, ParseRequest, ToolCall, ToolSpec,
};
pub use content::{ContentPart, ImageDetail, InputTurn, Role, TurnContent};
pub use error::{CompletionError, GatewayError};
pub use gateway::{AttachmentFetcher, ChatGateway, HistoryQuery};
pub use history::ConversationHistory;
pub use message::{
    Attachment, Author, ChannelId, ChannelInfo, ChatMessage, ContentKind, MessageId, MessageRef,
    UserId,
};

// Re-export async_trait for implementors of the collaborator traits
pub use async_trait::async_trait;
