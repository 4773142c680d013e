//! # docqa-rag
//!
//! Retrieval and answering core for single-document question answering.
//!
//! ## Overview
//!
//! A loaded document is split into overlapping chunks, indexed with TF-IDF,
//! and searched per question. The best chunks form the context for an
//! answer that comes either from an OpenAI chat model or, when no valid API
//! key is configured or the call fails, from keyword matching over the
//! context.
//!
//! - [`RecursiveChunker`] splits text at paragraph, line, word, and character boundaries
//! - [`LexicalIndex`] ranks chunks by TF-IDF cosine similarity
//! - [`assemble`] joins retrieved chunks into a context string
//! - [`AnswerGenerator`] produces an [`Answer`] from context and question
//! - [`QaPipeline`] and [`QaSession`] tie the steps together
//!
//! ## Features
//!
//! - `openai` (default) enables [`OpenAIChatModel`](openai::OpenAIChatModel)
//! - `documents` (default) enables PDF and `.docx` text extraction in [`load_document`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docqa_rag::{AnswerGenerator, QaPipeline, QaSession, RagConfig};
//!
//! let generator = AnswerGenerator::from_credential(std::env::var("OPENAI_API_KEY").ok().as_deref(), None);
//! let session = QaSession::new(QaPipeline::new(RagConfig::default(), generator));
//! session.load_document("notes.txt", &text).await?;
//! let answer = session.ask("What color is the sky?").await?;
//! println!("{}", answer.text);
//! ```

pub mod answer;
pub mod chunking;
pub mod config;
pub mod context;
pub mod document;
pub mod error;
pub mod index;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod session;
mod tokenize;

#[cfg(feature = "documents")]
pub mod extract;
#[cfg(feature = "openai")]
pub mod openai;

pub use answer::{
    Answer, AnswerGenerator, AnswerSource, ApiKey, LOCAL_DISCLAIMER, LocalReason,
    NOT_ENOUGH_INFORMATION, local_answer,
};
pub use chunking::RecursiveChunker;
pub use config::{ModelName, RagConfig, RagConfigBuilder};
pub use context::assemble;
pub use document::{Chunk, ConversationTurn, Role, SearchResult};
pub use error::{RagError, Result};
pub use index::LexicalIndex;
pub use loader::load_document;
pub use model::{ChatMessage, ChatModel, ChatRequest, ChatRole};
pub use pipeline::QaPipeline;
pub use session::{LoadedDocument, QaSession};
