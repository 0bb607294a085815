//! Outbound reply delivery under the platform size limit.

use std::sync::Arc;

use chat_core::{ChatGateway, ChatMessage, GatewayError};
use tracing::debug;

/// Per-message character limit of the chat platform.
pub const MAX_MESSAGE_LEN: usize = 2000;

/// Split `text` into consecutive chunks of at most `max_len` characters.
///
/// Cuts land on character boundaries; concatenating the chunks in order
/// reproduces the input exactly. Empty input yields no chunks.
pub fn chunk_text(text: &str, max_len: usize) -> Vec<&str> {
    let max_len = max_len.max(1);
    let mut chunks = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let cut = rest
            .char_indices()
            .nth(max_len)
            .map(|(index, _)| index)
            .unwrap_or(rest.len());
        let (chunk, tail) = rest.split_at(cut);
        chunks.push(chunk);
        rest = tail;
    }

    chunks
}

/// Delivers a final answer into the channel.
///
/// The first chunk goes out as a reply referencing the triggering
/// message; every further chunk is a plain follow-up in the same
/// channel, in order.
pub struct ReplyDispatcher<G> {
    gateway: Arc<G>,
}

impl<G: ChatGateway> ReplyDispatcher<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Deliver `text`, chunked to the platform limit. Returns the number
    /// of messages sent.
    pub async fn deliver(&self, trigger: &ChatMessage, text: &str) -> Result<usize, GatewayError> {
        let chunks = chunk_text(text, MAX_MESSAGE_LEN);

        for (index, chunk) in chunks.iter().enumerate() {
            if index == 0 {
                self.gateway.reply(trigger, chunk).await?;
            } else {
                self.gateway.send(trigger.channel.id, chunk).await?;
            }
        }

        debug!("delivered answer in {} chunk(s)", chunks.len());
        Ok(chunks.len())
    }
}
