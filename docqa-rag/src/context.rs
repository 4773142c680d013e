//! Context assembly for the answer generator.

use crate::document::SearchResult;

/// Separator placed between retrieved chunks.
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// Join the texts of retrieved chunks, in the given order, with a blank line.
///
/// Chunk text is used verbatim. No results yield an empty string.
pub fn assemble(results: &[SearchResult]) -> String {
    results.iter().map(|r| r.chunk.text.as_str()).collect::<Vec<_>>().join(CONTEXT_SEPARATOR)
}
