//! Chat model trait used by the delegated answer strategy.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ModelName;
use crate::error::Result;

/// The author of a [`ChatMessage`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A single message sent to a chat model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: ChatRole::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }
}

/// A chat completion request.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatRequest {
    pub model: ModelName,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// A backend that completes a chat conversation.
///
/// Implementations make exactly one attempt per call and report any failure
/// as [`RagError::ModelError`](crate::RagError::ModelError).
///
/// # Example
///
/// ```rust,ignore
/// use docqa_rag::{ChatModel, ChatRequest};
///
/// let reply = model.complete(request).await?;
/// ```
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Return the text of the first completion for `request`.
    async fn complete(&self, request: ChatRequest) -> Result<String>;

    /// A short provider name used in logs.
    fn provider(&self) -> &str {
        "custom"
    }
}
