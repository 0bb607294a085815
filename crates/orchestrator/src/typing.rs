//! Scoped typing indicator.

use std::sync::Arc;
use std::time::Duration;

use chat_core::{ChannelId, ChatGateway};
use tokio::task::JoinHandle;
use tracing::warn;

/// Interval between typing signals. Chat platforms expire the indicator
/// after roughly ten seconds; refreshing a little faster keeps it lit
/// for the whole request, independent of request latency.
pub const TYPING_INTERVAL: Duration = Duration::from_secs(8);

/// Keeps a channel's typing indicator alive while in scope.
///
/// The background task is aborted when the guard drops, so the indicator
/// stops on every exit path of the cycle that started it - success,
/// error, or unwind. It performs no other side effect.
#[derive(Debug)]
pub struct TypingSignal {
    task: JoinHandle<()>,
}

impl TypingSignal {
    /// Start signalling "typing" in `channel` until dropped.
    pub fn start<G: ChatGateway + 'static>(gateway: Arc<G>, channel: ChannelId) -> Self {
        let task = tokio::spawn(async move {
            loop {
                if let Err(e) = gateway.send_typing(channel).await {
                    warn!("failed to send typing signal: {}", e);
                }
                tokio::time::sleep(TYPING_INTERVAL).await;
            }
        });

        Self { task }
    }
}

impl Drop for TypingSignal {
    fn drop(&mut self) {
        self.task.abort();
    }
}
