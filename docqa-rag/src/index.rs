//! TF-IDF lexical index with cosine similarity search.
//!
//! [`LexicalIndex`] is built once per document and never mutated afterwards,
//! so it can be shared between concurrent readers behind an `Arc`.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::{debug, info};

use crate::document::{Chunk, SearchResult};
use crate::error::{RagError, Result};
use crate::tokenize::index_terms;

/// A sparse, L2-normalized term vector sorted by term id.
type SparseVector = Vec<(u32, f32)>;

/// An immutable TF-IDF index over a document's chunks.
///
/// Term weights are raw counts scaled by the smoothed inverse document
/// frequency `ln((1 + n) / (1 + df)) + 1`, and every chunk vector is
/// L2-normalized so that a dot product is the cosine similarity.
///
/// # Example
///
/// ```rust,ignore
/// use docqa_rag::LexicalIndex;
///
/// let index = LexicalIndex::build(chunks);
/// let results = index.search("what color is the sky", 4)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct LexicalIndex {
    chunks: Vec<Chunk>,
    vocabulary: HashMap<String, u32>,
    idf: Vec<f32>,
    vectors: Vec<SparseVector>,
}

impl LexicalIndex {
    /// Build an index over `chunks`, keeping their order as chunk indices.
    ///
    /// An empty chunk set yields a valid index whose searches return nothing.
    pub fn build<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let chunks: Vec<Chunk> = chunks
            .into_iter()
            .enumerate()
            .map(|(index, text)| Chunk { index, text: text.into() })
            .collect();

        let mut vocabulary: HashMap<String, u32> = HashMap::new();
        let mut document_frequency: Vec<u32> = Vec::new();
        let mut counts: Vec<HashMap<u32, u32>> = Vec::with_capacity(chunks.len());

        for chunk in &chunks {
            let mut chunk_counts: HashMap<u32, u32> = HashMap::new();
            for term in index_terms(&chunk.text) {
                let next_id = vocabulary.len() as u32;
                let id = *vocabulary.entry(term).or_insert_with(|| {
                    document_frequency.push(0);
                    next_id
                });
                *chunk_counts.entry(id).or_default() += 1;
            }
            for id in chunk_counts.keys() {
                document_frequency[*id as usize] += 1;
            }
            counts.push(chunk_counts);
        }

        let n = chunks.len() as f32;
        let idf: Vec<f32> =
            document_frequency.iter().map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0).collect();

        let vectors = counts.into_iter().map(|chunk_counts| weigh(chunk_counts, &idf)).collect();

        info!(chunk_count = chunks.len(), vocabulary_size = vocabulary.len(), "built lexical index");

        Self { chunks, vocabulary, idf, vectors }
    }

    /// Return up to `k` chunks ranked by cosine similarity to `query`.
    ///
    /// Results are ordered by descending score; equal scores keep chunk
    /// order. Scores lie in `[0, 1]` and may all be zero when the query
    /// shares no terms with the document.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::IndexError`] if `k == 0`.
    pub fn search(&self, query: &str, k: usize) -> Result<Vec<SearchResult>> {
        if k == 0 {
            return Err(RagError::IndexError("k must be greater than zero".to_string()));
        }
        if self.chunks.is_empty() {
            debug!("search on empty index");
            return Ok(Vec::new());
        }

        let mut query_counts: HashMap<u32, u32> = HashMap::new();
        for term in index_terms(query) {
            if let Some(&id) = self.vocabulary.get(&term) {
                *query_counts.entry(id).or_default() += 1;
            }
        }
        let query_vector = weigh(query_counts, &self.idf);

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(i, vector)| (i, dot(&query_vector, vector).clamp(0.0, 1.0)))
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal).then(a.0.cmp(&b.0)));
        scored.truncate(k);

        debug!(
            query_terms = query_vector.len(),
            result_count = scored.len(),
            top_score = scored.first().map(|(_, s)| *s).unwrap_or(0.0),
            "searched lexical index"
        );

        Ok(scored
            .into_iter()
            .map(|(i, score)| SearchResult { chunk: self.chunks[i].clone(), score })
            .collect())
    }

    /// The indexed chunks in chunk order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the index holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Number of distinct terms in the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Turn term counts into an L2-normalized TF-IDF vector.
///
/// Returns an empty vector when there are no counts.
fn weigh(counts: HashMap<u32, u32>, idf: &[f32]) -> SparseVector {
    let mut vector: SparseVector =
        counts.into_iter().map(|(id, count)| (id, count as f32 * idf[id as usize])).collect();
    vector.sort_unstable_by_key(|(id, _)| *id);

    let norm = vector.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
    if norm > 0.0 {
        for (_, weight) in &mut vector {
            *weight /= norm;
        }
    }
    vector
}

/// Dot product of two sparse vectors sorted by term id.
fn dot(a: &[(u32, f32)], b: &[(u32, f32)]) -> f32 {
    let (mut i, mut j) = (0, 0);
    let mut sum = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}
