//! Chat message types as delivered by the gateway.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique message identifier assigned by the chat platform.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique user identifier assigned by the chat platform.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique channel identifier assigned by the chat platform.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct ChannelId(pub u64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The author of a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: UserId,
    /// Display name, used in assembled context headers.
    pub name: String,
    /// Whether the platform marks this account as a bot.
    pub is_bot: bool,
}

impl Author {
    /// Create a human author.
    pub fn user(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_bot: false,
        }
    }

    /// Create a bot author.
    pub fn bot(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_bot: true,
        }
    }
}

/// Where a message was posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    pub id: ChannelId,
    /// Channel name, if the platform exposes one.
    pub name: Option<String>,
    /// Guild (server) name; `None` for direct messages.
    pub guild_name: Option<String>,
}

impl ChannelInfo {
    /// A direct-message channel (no guild, no name).
    pub fn direct(id: ChannelId) -> Self {
        Self {
            id,
            name: None,
            guild_name: None,
        }
    }

    /// A named channel inside a guild.
    pub fn guild(id: ChannelId, name: impl Into<String>, guild_name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            guild_name: Some(guild_name.into()),
        }
    }
}

/// Reference to another message, carried by replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRef {
    pub id: MessageId,
    pub author_id: UserId,
}

/// Media classification of an attachment.
///
/// Derived from the declared media type, never from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// `image/*` media types.
    Image,
    /// `text/*` media types.
    PlainText,
    /// Everything else.
    Other,
}

impl ContentKind {
    /// Classify a declared media type.
    pub fn from_media_type(media_type: &str) -> Self {
        if media_type.starts_with("image/") {
            Self::Image
        } else if media_type.starts_with("text/") {
            Self::PlainText
        } else {
            Self::Other
        }
    }
}

/// A file attached to a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Where the attachment bytes live.
    pub url: String,
    /// Original file name.
    pub filename: String,
    /// Declared media type (e.g. `image/png`).
    pub content_type: String,
}

impl Attachment {
    pub fn new(
        url: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
            content_type: content_type.into(),
        }
    }

    /// Classify this attachment by its declared media type.
    pub fn kind(&self) -> ContentKind {
        ContentKind::from_media_type(&self.content_type)
    }
}

/// A single message as delivered by the chat gateway.
///
/// Immutable once fetched; the orchestration core only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub author: Author,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub attachments: Vec<Attachment>,
    pub channel: ChannelInfo,
    /// Reply target, if this message was sent as a reply.
    pub reference: Option<MessageRef>,
}

impl ChatMessage {
    pub fn new(
        id: MessageId,
        author: Author,
        channel: ChannelInfo,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            author,
            content: content.into(),
            created_at,
            attachments: Vec::new(),
            channel,
            reference: None,
        }
    }

    /// Attach files to the message.
    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    /// Mark the message as a reply to another message.
    pub fn with_reference(mut self, reference: MessageRef) -> Self {
        self.reference = Some(reference);
        self
    }
}
