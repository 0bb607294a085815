//! Typed input representation consumed by the completion service.

use serde::{Deserialize, Serialize};

/// Conversation role of an input turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// Image fidelity requested from the completion service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageDetail {
    #[default]
    Auto,
    Low,
    High,
}

impl ImageDetail {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageDetail::Auto => "auto",
            ImageDetail::Low => "low",
            ImageDetail::High => "high",
        }
    }
}

/// Atomic content unit of an input turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    /// A plain text block.
    Text { text: String },
    /// An image referenced by URL.
    Image { url: String, detail: ImageDetail },
    /// An opaque file referenced by URL, never fetched.
    File { url: String },
    /// A text attachment whose bytes were inlined.
    EmbeddedText { text: String },
}

/// Content of an input turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnContent {
    /// A bare text block.
    Text(String),
    /// An ordered sequence of content parts.
    Parts(Vec<ContentPart>),
}

/// One turn of the completion input.
///
/// Turns are built fresh from the working history on every orchestration
/// attempt and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputTurn {
    pub role: Role,
    pub content: TurnContent,
}

impl InputTurn {
    /// A turn carrying a bare text block.
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            content: TurnContent::Text(text.into()),
        }
    }

    /// A turn carrying a part sequence.
    pub fn parts(role: Role, parts: Vec<ContentPart>) -> Self {
        Self {
            role,
            content: TurnContent::Parts(parts),
        }
    }
}
