//! Error types for the `docqa-rag` crate.

use thiserror::Error;

/// Errors that can occur while indexing a document or answering a question.
#[derive(Debug, Error)]
pub enum RagError {
    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The lexical index was used incorrectly (for example `k == 0`).
    #[error("Index error: {0}")]
    IndexError(String),

    /// The external chat model call failed.
    ///
    /// Never escapes [`AnswerGenerator::answer`](crate::AnswerGenerator::answer);
    /// it is logged and the local strategy answers instead.
    #[error("Model error ({provider}): {message}")]
    ModelError {
        /// The chat model provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The document format cannot be turned into text by this crate.
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension as given (lower-cased), or empty if none.
        extension: String,
    },

    /// A question was asked before any document was loaded.
    #[error("Please upload a document first.")]
    NoDocument,

    /// Reading a document from disk failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A convenience result type for docqa operations.
pub type Result<T> = std::result::Result<T, RagError>;
