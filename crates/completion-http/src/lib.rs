//! HTTP implementation of the [`CompletionService`] trait against an
//! OpenAI-compatible responses endpoint.
//!
//! Two call shapes are exposed through the trait:
//!
//! - `create` - free-text output, optionally offering function tools the
//!   service may invoke instead of answering
//! - `parse` - output constrained to a caller-supplied JSON schema
//!
//! Failed calls are never retried here; the orchestration loop treats a
//! completion failure as fatal for the cycle.
//!
//! [`CompletionService`]: chat_core::CompletionService

pub mod api_types;
mod client;
mod config;

pub use client::HttpCompletion;
pub use config::{HttpCompletionConfig, HttpCompletionConfigBuilder};
