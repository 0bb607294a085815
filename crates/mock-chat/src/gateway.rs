//! Mock chat gateway with a seeded timeline.

use async_trait::async_trait;
use chat_core::{ChannelId, ChatGateway, ChatMessage, GatewayError, HistoryQuery, MessageId};
use tokio::sync::Mutex;

/// One recorded outbound delivery, in send order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// A reply referencing a triggering message.
    Reply { to: MessageId, text: String },
    /// A plain channel message.
    Send { channel: ChannelId, text: String },
}

impl Outbound {
    pub fn text(&self) -> &str {
        match self {
            Outbound::Reply { text, .. } | Outbound::Send { text, .. } => text,
        }
    }
}

/// A gateway whose channel history is seeded up front.
///
/// `fetch_history` serves slices of the seeded timeline; all outbound
/// traffic is recorded for assertions.
#[derive(Debug, Default)]
pub struct MockGateway {
    /// Seeded timeline, ascending by timestamp.
    timeline: Mutex<Vec<ChatMessage>>,
    outbound: Mutex<Vec<Outbound>>,
    fetches: Mutex<Vec<(ChannelId, HistoryQuery)>>,
    typing: Mutex<usize>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the channel timeline. Messages are stored ascending by
    /// timestamp regardless of input order.
    pub async fn seed(&self, messages: impl IntoIterator<Item = ChatMessage>) {
        let mut timeline = self.timeline.lock().await;
        timeline.extend(messages);
        timeline.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    }

    /// All outbound deliveries, in send order.
    pub async fn outbound(&self) -> Vec<Outbound> {
        self.outbound.lock().await.clone()
    }

    /// All history fetches, in call order.
    pub async fn fetches(&self) -> Vec<(ChannelId, HistoryQuery)> {
        self.fetches.lock().await.clone()
    }

    /// How many typing signals were sent.
    pub async fn typing_signals(&self) -> usize {
        *self.typing.lock().await
    }
}

#[async_trait]
impl ChatGateway for MockGateway {
    async fn fetch_history(
        &self,
        channel: ChannelId,
        query: HistoryQuery,
    ) -> Result<Vec<ChatMessage>, GatewayError> {
        self.fetches.lock().await.push((channel, query));

        let timeline = self.timeline.lock().await;
        let end = match query.before {
            Some(before) => timeline
                .iter()
                .position(|m| m.id == before)
                .unwrap_or(timeline.len()),
            None => timeline.len(),
        };
        let start = end.saturating_sub(query.limit);

        // Newest first, as chat platforms page history
        let mut batch: Vec<ChatMessage> = timeline[start..end]
            .iter()
            .filter(|m| m.channel.id == channel)
            .cloned()
            .collect();
        batch.reverse();
        Ok(batch)
    }

    async fn send_typing(&self, _channel: ChannelId) -> Result<(), GatewayError> {
        *self.typing.lock().await += 1;
        Ok(())
    }

    async fn reply(&self, message: &ChatMessage, text: &str) -> Result<(), GatewayError> {
        self.outbound.lock().await.push(Outbound::Reply {
            to: message.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send(&self, channel: ChannelId, text: &str) -> Result<(), GatewayError> {
        self.outbound.lock().await.push(Outbound::Send {
            channel,
            text: text.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::{Author, ChannelInfo, UserId};
    use chrono::DateTime;

    fn message(id: u64, secs: i64) -> ChatMessage {
        ChatMessage::new(
            MessageId(id),
            Author::user(UserId(1), "ada"),
            ChannelInfo::direct(ChannelId(5)),
            format!("m{id}"),
            DateTime::from_timestamp(secs, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_serves_history_before_an_anchor() {
        let gateway = MockGateway::new();
        gateway
            .seed((1..=10).map(|i| message(i, i as i64 * 100)))
            .await;

        let batch = gateway
            .fetch_history(ChannelId(5), HistoryQuery::before(MessageId(8), 3))
            .await
            .unwrap();

        let ids: Vec<u64> = batch.iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![7, 6, 5]);
    }

    #[tokio::test]
    async fn test_records_outbound_in_order() {
        let gateway = MockGateway::new();
        let trigger = message(1, 100);

        gateway.reply(&trigger, "first").await.unwrap();
        gateway.send(ChannelId(5), "second").await.unwrap();

        let outbound = gateway.outbound().await;
        assert_eq!(outbound.len(), 2);
        assert_eq!(
            outbound[0],
            Outbound::Reply {
                to: MessageId(1),
                text: "first".to_string()
            }
        );
        assert_eq!(outbound[1].text(), "second");
    }
}
