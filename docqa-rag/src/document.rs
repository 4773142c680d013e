//! Data types for chunks, search results, and conversation turns.

use serde::{Deserialize, Serialize};

/// A bounded substring of a document, used as the retrieval unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    /// Position of the chunk in the order the chunker produced it.
    pub index: usize,
    /// The text content of the chunk.
    pub text: String,
}

/// A retrieved [`Chunk`] paired with its cosine similarity to the query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// The similarity score in `[0, 1]` (higher is more relevant).
    pub score: f32,
}

/// Who authored a [`ConversationTurn`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person asking questions.
    User,
    /// The answer generator.
    Assistant,
}

/// One message of the session transcript.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationTurn {
    /// Who wrote the message.
    pub role: Role,
    /// The message text.
    pub content: String,
}

impl ConversationTurn {
    /// A question from the user.
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    /// A reply to the user.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}
