//! Question-answering pipeline orchestrator.
//!
//! The [`QaPipeline`] coordinates indexing (chunk → index) and question
//! answering (search → assemble → answer) for a single document.
//!
//! # Example
//!
//! ```rust,ignore
//! use docqa_rag::{AnswerGenerator, QaPipeline, RagConfig};
//!
//! let pipeline = QaPipeline::new(RagConfig::default(), AnswerGenerator::local());
//! let index = pipeline.index_document(&text);
//! let answer = pipeline.ask(&index, "What color is the sky?").await?;
//! ```

use tracing::{error, info};

use crate::answer::{Answer, AnswerGenerator};
use crate::chunking::RecursiveChunker;
use crate::config::RagConfig;
use crate::context::assemble;
use crate::document::SearchResult;
use crate::error::Result;
use crate::index::LexicalIndex;

/// The question-answering pipeline.
#[derive(Debug, Clone)]
pub struct QaPipeline {
    config: RagConfig,
    chunker: RecursiveChunker,
    generator: AnswerGenerator,
}

impl QaPipeline {
    /// Create a pipeline from a validated configuration and a generator.
    pub fn new(config: RagConfig, generator: AnswerGenerator) -> Self {
        let chunker = RecursiveChunker::from_config(&config);
        Self { config, chunker, generator }
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Return a reference to the answer generator.
    pub fn generator(&self) -> &AnswerGenerator {
        &self.generator
    }

    /// Split `text` into chunks and build an index over them.
    pub fn index_document(&self, text: &str) -> LexicalIndex {
        let chunks = self.chunker.split(text);
        let chunk_count = chunks.len();
        let index = LexicalIndex::build(chunks);
        info!(text_len = text.chars().count(), chunk_count, "indexed document");
        index
    }

    /// Retrieve the `top_k` chunks most similar to `question`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::IndexError`](crate::RagError::IndexError) if the
    /// index rejects the search.
    pub fn retrieve(&self, index: &LexicalIndex, question: &str) -> Result<Vec<SearchResult>> {
        index.search(question, self.config.top_k).inspect_err(|e| {
            error!(error = %e, "retrieval failed");
        })
    }

    /// Answer `question` from `index`: retrieve → assemble → answer.
    ///
    /// # Errors
    ///
    /// Only retrieval can fail; answer generation always succeeds.
    pub async fn ask(&self, index: &LexicalIndex, question: &str) -> Result<Answer> {
        self.ask_with_sources(index, question).await.map(|(answer, _)| answer)
    }

    /// Like [`ask`](Self::ask), also returning the chunks the answer was
    /// grounded on, in retrieval order.
    pub async fn ask_with_sources(
        &self,
        index: &LexicalIndex,
        question: &str,
    ) -> Result<(Answer, Vec<SearchResult>)> {
        let results = self.retrieve(index, question)?;
        let context = assemble(&results);
        let answer = self
            .generator
            .answer(&context, question, self.config.temperature, self.config.model)
            .await;

        info!(
            retrieved = results.len(),
            delegated = answer.is_delegated(),
            "question answered"
        );
        Ok((answer, results))
    }
}
