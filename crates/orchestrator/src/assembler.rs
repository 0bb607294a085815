//! Context assembly: raw chat messages to typed completion input.

use std::sync::Arc;

use chat_core::{
    Attachment, AttachmentFetcher, ChatMessage, ContentKind, ContentPart, ConversationHistory,
    ImageDetail, InputTurn, Role, UserId,
};
use tracing::{debug, warn};

use crate::intake::strip_leading_prefix;

/// Cap on attachment-derived parts per message. Attachments beyond the
/// cap are silently dropped to bound payload growth.
pub const MAX_ATTACHMENT_PARTS: usize = 10;

/// Converts a conversation history into the completion service's typed
/// input, one turn per message.
///
/// The mapping is pure given its inputs: the only network call is the
/// conditional fetch that inlines a text attachment, and message order is
/// preserved exactly.
pub struct ContextAssembler<F> {
    bot_id: UserId,
    mention_prefix: String,
    fetcher: Arc<F>,
}

impl<F: AttachmentFetcher> ContextAssembler<F> {
    pub fn new(bot_id: UserId, fetcher: Arc<F>) -> Self {
        Self {
            bot_id,
            mention_prefix: format!("<@{}>", bot_id),
            fetcher,
        }
    }

    /// Build one input turn per message, in history order.
    pub async fn assemble(&self, history: &ConversationHistory) -> Vec<InputTurn> {
        let mut turns = Vec::with_capacity(history.len());
        for message in history.messages() {
            turns.push(self.message_turn(message).await);
        }
        turns
    }

    /// Render a single message as an input turn.
    ///
    /// Bot-authored messages become assistant turns carrying one
    /// synthesized text block; everything else becomes a user turn with
    /// the text block followed by attachment-derived parts.
    pub async fn message_turn(&self, message: &ChatMessage) -> InputTurn {
        let header = self.header_block(message);

        if message.author.id == self.bot_id {
            return InputTurn::text(Role::Assistant, header);
        }

        let mut parts = Vec::with_capacity(1 + message.attachments.len().min(MAX_ATTACHMENT_PARTS));
        parts.push(ContentPart::Text { text: header });

        if message.attachments.len() > MAX_ATTACHMENT_PARTS {
            debug!(
                "dropping {} attachment(s) beyond the per-message cap",
                message.attachments.len() - MAX_ATTACHMENT_PARTS
            );
        }
        for attachment in message.attachments.iter().take(MAX_ATTACHMENT_PARTS) {
            parts.push(self.attachment_part(message, attachment).await);
        }

        InputTurn::parts(Role::User, parts)
    }

    /// The synthesized `from:`/`time:` text block for a message.
    fn header_block(&self, message: &ChatMessage) -> String {
        let body = strip_leading_prefix(&message.content, &self.mention_prefix);
        format!(
            "from:{}\ntime:{}\n{}",
            message.author.name,
            message.created_at.to_rfc3339(),
            body
        )
    }

    async fn attachment_part(&self, message: &ChatMessage, attachment: &Attachment) -> ContentPart {
        match attachment.kind() {
            ContentKind::Image => ContentPart::Image {
                url: attachment.url.clone(),
                detail: ImageDetail::Auto,
            },
            ContentKind::PlainText => match self.fetcher.fetch_text(&attachment.url).await {
                Ok(text) => ContentPart::EmbeddedText {
                    text: format!(
                        "from:{}\ntime:{}\nfilename:{}\ncontent:\n{}",
                        message.author.name,
                        message.created_at.to_rfc3339(),
                        attachment.filename,
                        text
                    ),
                },
                Err(e) => {
                    // A side attachment is not worth failing the reply for
                    warn!("could not inline text attachment {}: {}", attachment.url, e);
                    ContentPart::File {
                        url: attachment.url.clone(),
                    }
                }
            },
            ContentKind::Other => ContentPart::File {
                url: attachment.url.clone(),
            },
        }
    }
}
