//! Interactive question-answering session over one loaded document.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::answer::Answer;
use crate::document::{ConversationTurn, SearchResult};
use crate::error::{RagError, Result};
use crate::index::LexicalIndex;
use crate::pipeline::QaPipeline;

/// A document and the index built from it.
#[derive(Debug)]
pub struct LoadedDocument {
    pub name: String,
    pub index: LexicalIndex,
}

/// Holds the current document and the conversation about it.
///
/// Loading a document builds the new index before taking the write lock and
/// then swaps the shared snapshot, so a question already in flight finishes
/// against the index it started with.
#[derive(Debug)]
pub struct QaSession {
    pipeline: QaPipeline,
    document: RwLock<Option<Arc<LoadedDocument>>>,
    transcript: RwLock<Vec<ConversationTurn>>,
}

impl QaSession {
    /// Create a session with no document loaded.
    pub fn new(pipeline: QaPipeline) -> Self {
        Self { pipeline, document: RwLock::new(None), transcript: RwLock::new(Vec::new()) }
    }

    /// The pipeline used to index and answer.
    pub fn pipeline(&self) -> &QaPipeline {
        &self.pipeline
    }

    /// Index `text` as the current document and start a fresh transcript.
    ///
    /// Returns the number of chunks indexed.
    pub async fn load_document(&self, name: impl Into<String>, text: &str) -> Result<usize> {
        let name = name.into();
        let index = self.pipeline.index_document(text);
        let chunk_count = index.len();
        if chunk_count == 0 {
            warn!(document = %name, "document produced no chunks");
        }

        let loaded = Arc::new(LoadedDocument { name, index });
        *self.document.write().await = Some(Arc::clone(&loaded));
        self.transcript.write().await.clear();

        info!(document = %loaded.name, chunk_count, "document loaded");
        Ok(chunk_count)
    }

    /// Drop the current document and transcript.
    pub async fn clear(&self) {
        *self.document.write().await = None;
        self.transcript.write().await.clear();
        info!("session cleared");
    }

    /// Clear the transcript, keeping the document.
    pub async fn clear_transcript(&self) {
        self.transcript.write().await.clear();
    }

    /// Ask a question about the current document.
    ///
    /// The question and the reply are appended to the transcript together;
    /// on failure the reply is the error message.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::NoDocument`] if nothing is loaded.
    pub async fn ask(&self, question: &str) -> Result<Answer> {
        self.ask_with_sources(question).await.map(|(answer, _)| answer)
    }

    /// Like [`ask`](Self::ask), also returning the retrieved chunks the
    /// answer was built from.
    pub async fn ask_with_sources(&self, question: &str) -> Result<(Answer, Vec<SearchResult>)> {
        let snapshot = self.document.read().await.clone();
        let result = match snapshot {
            Some(document) => self.pipeline.ask_with_sources(&document.index, question).await,
            None => Err(RagError::NoDocument),
        };

        let reply = match &result {
            Ok((answer, _)) => answer.text.clone(),
            Err(e) => e.to_string(),
        };
        let mut transcript = self.transcript.write().await;
        transcript.push(ConversationTurn::user(question));
        transcript.push(ConversationTurn::assistant(reply));
        result
    }

    /// A copy of the conversation so far.
    pub async fn transcript(&self) -> Vec<ConversationTurn> {
        self.transcript.read().await.clone()
    }

    /// Name of the loaded document, if any.
    pub async fn document_name(&self) -> Option<String> {
        self.document.read().await.as_ref().map(|d| d.name.clone())
    }

    /// Whether a document is loaded.
    pub async fn has_document(&self) -> bool {
        self.document.read().await.is_some()
    }

    /// Snapshot of the loaded document.
    pub async fn document(&self) -> Option<Arc<LoadedDocument>> {
        self.document.read().await.clone()
    }
}
