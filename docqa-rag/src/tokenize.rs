//! Tokenization shared by the lexical index and the keyword answer strategy.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Terms the index recognizes: two or more word characters.
static TERM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\w\w+\b").expect("unreachable error: invalid term pattern")
});

/// Any run of word characters.
static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\w+\b").expect("unreachable error: invalid word pattern")
});

/// Sentence terminator followed by the whitespace run that ends the sentence.
static SENTENCE_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[.!?]\s+").expect("unreachable error: invalid sentence pattern")
});

/// Function words dropped from questions before keyword matching.
const QUESTION_STOP_WORDS: [&str; 15] = [
    "the", "a", "an", "in", "on", "at", "to", "for", "with", "by", "about", "from", "of", "and",
    "or",
];

/// The standard English stop-word list used by TF-IDF vectorizers.
static ENGLISH_STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
        "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
        "amongst", "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone",
        "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became",
        "because", "become", "becomes", "becoming", "been", "before", "beforehand", "behind",
        "being", "below", "beside", "besides", "between", "beyond", "bill", "both", "bottom",
        "but", "by", "call", "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de",
        "describe", "detail", "do", "done", "down", "due", "during", "each", "eg", "eight",
        "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even", "ever",
        "every", "everyone", "everything", "everywhere", "except", "few", "fifteen", "fifty",
        "fill", "find", "fire", "first", "five", "for", "former", "formerly", "forty", "found",
        "four", "from", "front", "full", "further", "get", "give", "go", "had", "has", "hasnt",
        "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein", "hereupon", "hers",
        "herself", "him", "himself", "his", "how", "however", "hundred", "i", "ie", "if", "in",
        "inc", "indeed", "interest", "into", "is", "it", "its", "itself", "keep", "last",
        "latter", "latterly", "least", "less", "ltd", "made", "many", "may", "me", "meanwhile",
        "might", "mill", "mine", "more", "moreover", "most", "mostly", "move", "much", "must",
        "my", "myself", "name", "namely", "neither", "never", "nevertheless", "next", "nine",
        "no", "nobody", "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off",
        "often", "on", "once", "one", "only", "onto", "or", "other", "others", "otherwise", "our",
        "ours", "ourselves", "out", "over", "own", "part", "per", "perhaps", "please", "put",
        "rather", "re", "same", "see", "seem", "seemed", "seeming", "seems", "serious", "several",
        "she", "should", "show", "side", "since", "sincere", "six", "sixty", "so", "some",
        "somehow", "someone", "something", "sometime", "sometimes", "somewhere", "still", "such",
        "system", "take", "ten", "than", "that", "the", "their", "them", "themselves", "then",
        "thence", "there", "thereafter", "thereby", "therefore", "therein", "thereupon", "these",
        "they", "thick", "thin", "third", "this", "those", "though", "three", "through",
        "throughout", "thru", "thus", "to", "together", "too", "top", "toward", "towards",
        "twelve", "twenty", "two", "un", "under", "until", "up", "upon", "us", "very", "via",
        "was", "we", "well", "were", "what", "whatever", "when", "whence", "whenever", "where",
        "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever", "whether",
        "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why", "will",
        "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
        "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Lower-case `text` and return its index terms in order, stop words removed.
pub(crate) fn index_terms(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TERM_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|term| !ENGLISH_STOP_WORDS.contains(term))
        .map(str::to_string)
        .collect()
}

/// Distinct keywords of a question, in first-seen order.
///
/// Tokens of two characters or fewer and common function words are dropped.
pub(crate) fn question_keywords(question: &str) -> Vec<String> {
    let lowered = question.to_lowercase();
    let mut seen = HashSet::new();
    WORD_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|word| word.chars().count() > 2 && !QUESTION_STOP_WORDS.contains(word))
        .filter(|word| seen.insert(*word))
        .map(str::to_string)
        .collect()
}

/// Split text into sentences after `.`, `!` or `?` followed by whitespace.
///
/// Terminal punctuation stays with its sentence; the whitespace is consumed.
pub(crate) fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for boundary in SENTENCE_BOUNDARY.find_iter(text) {
        // The punctuation is a single ASCII byte.
        sentences.push(&text[start..boundary.start() + 1]);
        start = boundary.end();
    }
    sentences.push(&text[start..]);
    sentences.into_iter().filter(|s| !s.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_word_list_is_complete() {
        assert_eq!(ENGLISH_STOP_WORDS.len(), 318);
    }

    #[test]
    fn index_terms_drop_short_tokens_and_stop_words() {
        assert_eq!(index_terms("The Sky is BLUE, a b c"), vec!["sky", "blue"]);
    }

    #[test]
    fn question_keywords_are_distinct_and_ordered() {
        assert_eq!(question_keywords("What color is the sky? Sky color!"), vec!["what", "color", "sky"]);
    }

    #[test]
    fn sentences_keep_punctuation() {
        assert_eq!(
            split_sentences("The sky is blue. Grass is green!  Why?"),
            vec!["The sky is blue.", "Grass is green!", "Why?"]
        );
        assert_eq!(split_sentences("version 1.5 is out"), vec!["version 1.5 is out"]);
        assert!(split_sentences("").is_empty());
    }
}
