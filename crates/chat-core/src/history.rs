//! Working conversation history for one response cycle.

use indexmap::IndexMap;

use crate::message::{ChatMessage, MessageId};

/// Ordered, duplicate-free message history.
///
/// Invariants, re-established after every merge:
///
/// - no two entries share an id
/// - entries are sorted ascending by `created_at` (ties broken by id)
///
/// The history is private to one response cycle. Merging computes the new
/// state from a snapshot and replaces the backing map wholesale, so a
/// cycle's view stays consistent even while the gateway's underlying data
/// changes concurrently.
#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    messages: IndexMap<MessageId, ChatMessage>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a history from an unordered batch of messages.
    pub fn from_messages(messages: impl IntoIterator<Item = ChatMessage>) -> Self {
        let mut history = Self::new();
        history.merge(messages);
        history
    }

    /// Merge a batch into the history, dropping duplicate ids, then
    /// re-sort ascending by timestamp.
    ///
    /// Existing entries win over incoming duplicates. Idempotent under
    /// repeated identical batches.
    pub fn merge(&mut self, batch: impl IntoIterator<Item = ChatMessage>) {
        let mut merged = std::mem::take(&mut self.messages);
        for message in batch {
            merged.entry(message.id).or_insert(message);
        }
        merged.sort_by(|_, a, _, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        self.messages = merged;
    }

    /// The earliest-known message, if any.
    pub fn earliest(&self) -> Option<&ChatMessage> {
        self.messages.first().map(|(_, message)| message)
    }

    /// The latest-known message, if any.
    pub fn latest(&self) -> Option<&ChatMessage> {
        self.messages.last().map(|(_, message)| message)
    }

    pub fn contains(&self, id: MessageId) -> bool {
        self.messages.contains_key(&id)
    }

    /// Messages in ascending timestamp order.
    pub fn messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.values()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
