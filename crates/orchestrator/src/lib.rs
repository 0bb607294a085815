//! The response-orchestration loop.
//!
//! This crate decides when the bot answers, assembles conversational
//! context for the completion service, lets the service pull older
//! history through a bounded tool-call loop, and delivers the final
//! answer back into the chat.
//!
//! # Architecture
//!
//! ```text
//! Message-created event (from the chat gateway)
//!          ↓
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         RESPONDER                            │
//! │                                                              │
//! │  1. Intake filter (mention prefix / reply-to-bot)            │
//! │         ↓                                                    │
//! │  2. Seed history: trigger + 5 preceding messages             │
//! │         ↓                                                    │
//! │  3. Select a model tier (one schema-constrained call)        │
//! │         ↓                                                    │
//! │  4. Start typing signal (scoped, stops on every exit path)   │
//! │         ↓                                                    │
//! │  5. Attempt loop (at most 3):                                │
//! │     • assemble input turns from current history              │
//! │     • completion call, get_messages offered on 0 and 1 only  │
//! │     • tool calls → expand history, next attempt              │
//! │     • plain text → terminal answer                           │
//! │         ↓                                                    │
//! │  6. Deliver the answer in 2000-character chunks              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Failures from the two external services are carried as values and
//! reported back into the channel; only the intake filter exits
//! silently.

mod assembler;
mod config;
mod dispatcher;
mod error;
mod expander;
mod intake;
mod orchestrator;
mod selector;
mod typing;

pub use assembler::{ContextAssembler, MAX_ATTACHMENT_PARTS};
pub use config::{ResponderConfig, ResponderConfigBuilder};
pub use dispatcher::{chunk_text, ReplyDispatcher, MAX_MESSAGE_LEN};
pub use error::OrchestrateError;
pub use expander::{clamp_limit, HistoryExpander, MAX_FETCH_LIMIT, MIN_FETCH_LIMIT};
pub use intake::{Intake, IntakeFilter};
pub use orchestrator::{
    get_messages_tool, Handled, Responder, GET_MESSAGES_TOOL, MAX_ATTEMPTS, SEED_PRECEDING,
};
pub use selector::{ModelSelector, ModelTier};
pub use typing::{TypingSignal, TYPING_INTERVAL};

// Re-export the collaborator seams implementors need
pub use chat_core::{AttachmentFetcher, ChatGateway, CompletionService};
