//! On-demand history expansion.

use std::sync::Arc;

use chat_core::{
    ChannelId, ChatGateway, ChatMessage, ConversationHistory, GatewayError, HistoryQuery, MessageId,
};
use tracing::debug;

/// Smallest number of messages one tool call may request.
pub const MIN_FETCH_LIMIT: i64 = 1;
/// Largest number of messages one tool call may request.
pub const MAX_FETCH_LIMIT: i64 = 20;

/// Fetches older messages and merges them into the working history.
///
/// The history is mutated only here, and only by merge-and-resort: the
/// new state is computed from a local snapshot and written back as a
/// whole, never edited in place.
pub struct HistoryExpander<G> {
    gateway: Arc<G>,
}

impl<G: ChatGateway> HistoryExpander<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Honor a batch of fetch requests against one history.
    ///
    /// Each fetch is anchored to the earliest message known at the time
    /// of that fetch - working history plus batches fetched earlier in
    /// the same response - and everything is merged and re-sorted once at
    /// the end. Sequential anchoring keeps concurrent tool calls from
    /// racing each other over a shared anchor.
    ///
    /// Idempotent under repeated identical requests: duplicates are
    /// dropped by id during the merge.
    ///
    /// Returns the number of messages fetched (before deduplication).
    pub async fn expand(
        &self,
        history: &mut ConversationHistory,
        channel: ChannelId,
        limits: &[usize],
    ) -> Result<usize, GatewayError> {
        let mut pending: Vec<ChatMessage> = Vec::new();

        for &limit in limits {
            let query = match earliest_known(history, &pending) {
                Some(anchor) => HistoryQuery::before(anchor, limit),
                None => HistoryQuery::latest(limit),
            };

            let batch = self.gateway.fetch_history(channel, query).await?;
            debug!(
                "fetched {} older message(s) (requested {})",
                batch.len(),
                limit
            );
            pending.extend(batch);
        }

        let fetched = pending.len();
        history.merge(pending);
        Ok(fetched)
    }
}

/// Clamp a requested limit into `[MIN_FETCH_LIMIT, MAX_FETCH_LIMIT]`.
pub fn clamp_limit(limit: i64) -> usize {
    limit.clamp(MIN_FETCH_LIMIT, MAX_FETCH_LIMIT) as usize
}

/// The id of the earliest message across the history and pending batches.
fn earliest_known(history: &ConversationHistory, pending: &[ChatMessage]) -> Option<MessageId> {
    let from_history = history.earliest().map(|m| (m.created_at, m.id));
    let from_pending = pending.iter().map(|m| (m.created_at, m.id)).min();

    [from_history, from_pending]
        .into_iter()
        .flatten()
        .min()
        .map(|(_, id)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::{Author, ChannelInfo, UserId};
    use chrono::DateTime;
    use mock_chat::MockGateway;

    const CHANNEL: ChannelId = ChannelId(5);

    fn message(id: u64, secs: i64) -> ChatMessage {
        ChatMessage::new(
            MessageId(id),
            Author::user(UserId(1), "ada"),
            ChannelInfo::direct(CHANNEL),
            format!("m{id}"),
            DateTime::from_timestamp(secs, 0).unwrap(),
        )
    }

    async fn seeded_gateway() -> Arc<MockGateway> {
        let gateway = Arc::new(MockGateway::new());
        gateway
            .seed((1..=20).map(|i| message(i, i as i64 * 100)))
            .await;
        gateway
    }

    #[test]
    fn test_clamps_limits_into_range() {
        assert_eq!(clamp_limit(0), 1);
        assert_eq!(clamp_limit(-3), 1);
        assert_eq!(clamp_limit(7), 7);
        assert_eq!(clamp_limit(500), 20);
    }

    #[tokio::test]
    async fn test_fetches_older_than_the_earliest_known() {
        let gateway = seeded_gateway().await;
        let expander = HistoryExpander::new(gateway.clone());
        let mut history = ConversationHistory::from_messages([message(18, 1800), message(19, 1900)]);

        let fetched = expander.expand(&mut history, CHANNEL, &[3]).await.unwrap();

        assert_eq!(fetched, 3);
        let ids: Vec<u64> = history.messages().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![15, 16, 17, 18, 19]);

        let fetches = gateway.fetches().await;
        assert_eq!(fetches.len(), 1);
        assert_eq!(fetches[0].1, HistoryQuery::before(MessageId(18), 3));
    }

    #[tokio::test]
    async fn test_sequential_anchoring_across_multiple_requests() {
        let gateway = seeded_gateway().await;
        let expander = HistoryExpander::new(gateway.clone());
        let mut history = ConversationHistory::from_messages([message(20, 2000)]);

        let fetched = expander
            .expand(&mut history, CHANNEL, &[2, 2])
            .await
            .unwrap();

        assert_eq!(fetched, 4);
        let ids: Vec<u64> = history.messages().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![16, 17, 18, 19, 20]);

        // The second fetch anchors on the earliest message of the first
        // batch, not on the original history
        let fetches = gateway.fetches().await;
        assert_eq!(fetches[0].1, HistoryQuery::before(MessageId(20), 2));
        assert_eq!(fetches[1].1, HistoryQuery::before(MessageId(18), 2));
    }

    #[tokio::test]
    async fn test_repeated_identical_requests_stay_duplicate_free() {
        let gateway = seeded_gateway().await;
        let expander = HistoryExpander::new(gateway.clone());
        let mut history = ConversationHistory::from_messages([message(10, 1000)]);

        expander.expand(&mut history, CHANNEL, &[5]).await.unwrap();
        let len_after_first = history.len();

        // Simulate the same batch arriving again: merge is keyed by id
        let mut replay = ConversationHistory::from_messages([message(10, 1000)]);
        expander.expand(&mut replay, CHANNEL, &[5]).await.unwrap();
        history.merge(replay.messages().cloned().collect::<Vec<_>>());

        assert_eq!(history.len(), len_after_first);
    }

    #[tokio::test]
    async fn test_empty_history_fetches_the_latest_messages() {
        let gateway = seeded_gateway().await;
        let expander = HistoryExpander::new(gateway.clone());
        let mut history = ConversationHistory::new();

        expander.expand(&mut history, CHANNEL, &[4]).await.unwrap();

        let ids: Vec<u64> = history.messages().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![17, 18, 19, 20]);
    }
}
