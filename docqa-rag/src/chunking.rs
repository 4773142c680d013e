//! Document chunking.
//!
//! [`RecursiveChunker`] splits text into overlapping windows, preferring to
//! break at paragraph boundaries, then line boundaries, then spaces, and
//! finally between any two characters.

use std::collections::VecDeque;

use crate::config::RagConfig;

/// Separators in priority order. The empty separator splits into characters.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// Splits text hierarchically: paragraphs → lines → words → characters.
///
/// Pieces produced by the highest-priority separator present in the text are
/// merged greedily into windows of at most `chunk_size` characters. A piece
/// that is too large on its own is split again with the next separator.
/// When a window is emitted, its trailing pieces (up to `chunk_overlap`
/// characters) are carried over to start the next window.
///
/// Lengths are counted in `char`s, never bytes. Emitted chunks are trimmed of
/// surrounding whitespace and never empty.
///
/// # Example
///
/// ```rust,ignore
/// use docqa_rag::RecursiveChunker;
///
/// let chunker = RecursiveChunker::new(1000, 200);
/// let chunks = chunker.split(&document_text);
/// ```
#[derive(Debug, Clone)]
pub struct RecursiveChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RecursiveChunker {
    /// Create a new `RecursiveChunker`.
    ///
    /// # Arguments
    ///
    /// * `chunk_size`: maximum number of characters per chunk
    /// * `chunk_overlap`: maximum number of characters shared by consecutive chunks
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self { chunk_size: chunk_size.max(1), chunk_overlap }
    }

    /// Create a chunker using the sizes from a validated [`RagConfig`].
    pub fn from_config(config: &RagConfig) -> Self {
        Self::new(config.chunk_size, config.chunk_overlap)
    }

    /// Split `text` into chunks.
    ///
    /// Returns an empty `Vec` if the text is empty or whitespace only. The
    /// result depends only on the text and the chunker's sizes.
    pub fn split(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        if !text.is_empty() {
            self.split_recursive(text, &SEPARATORS, &mut chunks);
        }
        chunks
    }

    fn split_recursive(&self, text: &str, separators: &[&str], out: &mut Vec<String>) {
        let (separator, remaining_separators) = pick_separator(text, separators);

        let mut pending: Vec<&str> = Vec::new();
        for piece in split_keeping_separator(text, separator) {
            if char_len(piece) < self.chunk_size {
                pending.push(piece);
                continue;
            }

            if !pending.is_empty() {
                self.merge(&pending, out);
                pending.clear();
            }
            if remaining_separators.is_empty() {
                push_trimmed(out, piece);
            } else {
                self.split_recursive(piece, remaining_separators, out);
            }
        }

        if !pending.is_empty() {
            self.merge(&pending, out);
        }
    }

    /// Merge consecutive pieces into windows of at most `chunk_size` characters.
    fn merge(&self, pieces: &[&str], out: &mut Vec<String>) {
        let mut window: VecDeque<(&str, usize)> = VecDeque::new();
        let mut total = 0;

        for &piece in pieces {
            let len = char_len(piece);
            if total + len > self.chunk_size && !window.is_empty() {
                push_trimmed(out, &concat(&window));

                // Keep a tail of at most `chunk_overlap` characters that still
                // leaves room for the incoming piece.
                while total > self.chunk_overlap || (total > 0 && total + len > self.chunk_size) {
                    match window.pop_front() {
                        Some((_, dropped)) => total -= dropped,
                        None => break,
                    }
                }
            }
            window.push_back((piece, len));
            total += len;
        }

        if !window.is_empty() {
            push_trimmed(out, &concat(&window));
        }
    }
}

/// Return the first separator present in `text` and the lower-priority
/// separators that follow it.
fn pick_separator<'s>(text: &str, separators: &'s [&'s str]) -> (&'s str, &'s [&'s str]) {
    for (i, separator) in separators.iter().enumerate() {
        if separator.is_empty() || text.contains(*separator) {
            return (*separator, &separators[i + 1..]);
        }
    }
    ("", &[])
}

/// Split text at a separator, attaching each separator to the start of the
/// piece that follows it. Empty pieces are dropped. An empty separator splits
/// into individual characters.
fn split_keeping_separator<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        return text.char_indices().map(|(i, c)| &text[i..i + c.len_utf8()]).collect();
    }

    let mut result = Vec::new();
    let mut start = 0;
    for (pos, _) in text.match_indices(separator) {
        if pos > start {
            result.push(&text[start..pos]);
        }
        start = pos;
    }
    if start < text.len() {
        result.push(&text[start..]);
    }
    result
}

fn concat(window: &VecDeque<(&str, usize)>) -> String {
    window.iter().map(|(piece, _)| *piece).collect()
}

fn push_trimmed(out: &mut Vec<String>, text: &str) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}
