//! Chat gateway interface.
//!
//! The gateway owns connection setup, credentials, and the wire protocol
//! of the chat platform; the orchestration core only sees this trait.

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::message::{ChannelId, ChatMessage, MessageId};

/// Parameters for a history fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    /// Maximum number of messages to return.
    pub limit: usize,
    /// Only messages strictly older than this id.
    pub before: Option<MessageId>,
}

impl HistoryQuery {
    /// The most recent `limit` messages of a channel.
    pub fn latest(limit: usize) -> Self {
        Self {
            limit,
            before: None,
        }
    }

    /// Up to `limit` messages strictly older than `before`.
    pub fn before(before: MessageId, limit: usize) -> Self {
        Self {
            limit,
            before: Some(before),
        }
    }
}

/// The chat platform collaborator.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Fetch message history for a channel.
    ///
    /// Returned order is platform-defined; callers re-sort.
    async fn fetch_history(
        &self,
        channel: ChannelId,
        query: HistoryQuery,
    ) -> Result<Vec<ChatMessage>, GatewayError>;

    /// Signal that the bot is typing in a channel. The indicator expires
    /// on its own after a few seconds and must be re-sent to stay lit.
    async fn send_typing(&self, channel: ChannelId) -> Result<(), GatewayError>;

    /// Send `text` as a reply referencing `message`.
    async fn reply(&self, message: &ChatMessage, text: &str) -> Result<(), GatewayError>;

    /// Send `text` as a plain channel message.
    async fn send(&self, channel: ChannelId, text: &str) -> Result<(), GatewayError>;
}

/// Fetches attachment bytes when the context assembler inlines a text
/// attachment. Kept separate from [`ChatGateway`]: attachments live on a
/// CDN, not behind the gateway connection.
#[async_trait]
pub trait AttachmentFetcher: Send + Sync {
    /// Fetch a text attachment's contents.
    async fn fetch_text(&self, url: &str) -> Result<String, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_query_constructors() {
        let query = HistoryQuery::latest(5);
        assert_eq!(query.limit, 5);
        assert!(query.before.is_none());

        let query = HistoryQuery::before(MessageId(100), 20);
        assert_eq!(query.before, Some(MessageId(100)));
        assert_eq!(query.limit, 20);
    }
}
