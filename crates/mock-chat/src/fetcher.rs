//! In-memory attachment store.

use std::collections::HashMap;

use async_trait::async_trait;
use chat_core::{AttachmentFetcher, GatewayError};

/// An attachment fetcher serving from a fixed url -> text map.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    texts: HashMap<String, String>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an attachment's text under its url.
    pub fn with_text(mut self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.texts.insert(url.into(), text.into());
        self
    }
}

#[async_trait]
impl AttachmentFetcher for StaticFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, GatewayError> {
        self.texts
            .get(url)
            .cloned()
            .ok_or_else(|| GatewayError::Attachment(format!("no such attachment: {}", url)))
    }
}
