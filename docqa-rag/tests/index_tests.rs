//! Tests for TF-IDF search ranking.

use docqa_rag::{LexicalIndex, RagError};
use proptest::prelude::*;

fn arb_sentence() -> impl Strategy<Value = String> {
    proptest::collection::vec("[a-z]{3,8}", 1..8).prop_map(|words| words.join(" "))
}

/// Search returns at most `k` results (and no more than the chunk count),
/// ordered by non-increasing score within `[0, 1]`.
mod prop_search_ordering {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn results_ordered_descending_and_bounded_by_k(
            chunks in proptest::collection::vec(arb_sentence(), 0..20),
            query in arb_sentence(),
            k in 1usize..25,
        ) {
            let index = LexicalIndex::build(chunks.clone());
            let results = index.search(&query, k).unwrap();

            prop_assert!(results.len() <= k);
            prop_assert_eq!(results.len(), k.min(chunks.len()));

            for window in results.windows(2) {
                prop_assert!(window[0].score >= window[1].score);
                if window[0].score == window[1].score {
                    prop_assert!(window[0].chunk.index < window[1].chunk.index);
                }
            }
            for result in &results {
                prop_assert!((0.0..=1.0).contains(&result.score));
                prop_assert_eq!(&result.chunk.text, &chunks[result.chunk.index]);
            }
        }
    }
}

#[test]
fn verbatim_chunk_ranks_first() {
    let chunks = [
        "The quick brown fox jumps over the fence",
        "Lazy dogs sleep through the afternoon",
        "Rust compilers check borrows before running code",
    ];
    let index = LexicalIndex::build(chunks);
    let results = index.search(chunks[1], 3).unwrap();

    assert_eq!(results[0].chunk.index, 1);
    assert!((results[0].score - 1.0).abs() < 1e-5);
    assert!(results[1].score < results[0].score);
}

#[test]
fn empty_index_returns_nothing() {
    let index = LexicalIndex::build(Vec::<String>::new());
    assert!(index.is_empty());
    assert!(index.search("anything at all", 4).unwrap().is_empty());
}

#[test]
fn unknown_terms_score_zero_in_chunk_order() {
    let index = LexicalIndex::build(["apples grow on trees", "oranges are citrus"]);
    let results = index.search("submarine periscope", 4).unwrap();

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.score == 0.0));
    assert_eq!(results[0].chunk.index, 0);
    assert_eq!(results[1].chunk.index, 1);
}

#[test]
fn stop_word_only_document_is_searchable() {
    let index = LexicalIndex::build(["the and of", "it is"]);
    assert_eq!(index.vocabulary_size(), 0);
    let results = index.search("the", 1).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].score, 0.0);
}

#[test]
fn zero_k_is_rejected() {
    let index = LexicalIndex::build(["some text"]);
    assert!(matches!(index.search("text", 0), Err(RagError::IndexError(_))));
}
