//! Lexical tokenizer for job/resume matching.
//!
//! Any code point that is not alphanumeric (Unicode-aware) separates tokens.
//! Tokens are lower-cased with `str::to_lowercase`; no stemming and no locale
//! specific folding is applied.

use std::collections::HashSet;

/// Keywords shorter than this many characters are dropped from job text.
pub const MIN_KEYWORD_LEN: usize = 3;

/// Common English function words. Must stay sorted: looked up by binary search.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
    "any", "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during",
    "each", "etc", "few", "for", "from", "further", "had", "has", "have", "having", "he",
    "her", "here", "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into",
    "is", "it", "its", "itself", "just", "may", "me", "more", "most", "must", "my", "myself",
    "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours",
    "ourselves", "out", "over", "own", "same", "she", "should", "so", "some", "such", "than",
    "that", "the", "their", "theirs", "them", "themselves", "then", "there", "these", "they",
    "this", "those", "through", "to", "too", "under", "until", "up", "upon", "very", "via",
    "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
    "will", "with", "within", "would", "you", "your", "yours", "yourself", "yourselves",
];

/// Splits text on non-alphanumeric boundaries and lower-cases every piece.
/// Order and duplicates are preserved.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|piece| !piece.is_empty())
        .map(str::to_lowercase)
        .collect()
}

pub fn is_stopword(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok()
}

/// Extracts the ordered, deduplicated keyword set of a job text.
///
/// A token survives when it has at least [`MIN_KEYWORD_LEN`] characters and is
/// not a stopword. The first occurrence fixes its position.
pub fn extract_keywords(job_text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokenize(job_text)
        .into_iter()
        .filter(|token| token.chars().count() >= MIN_KEYWORD_LEN && !is_stopword(token))
        .filter(|token| seen.insert(token.clone()))
        .collect()
}

/// Membership set of every token in a resume. No length or stopword filter:
/// only job-side keywords are ever looked up in it.
pub fn token_set(resume_text: &str) -> HashSet<String> {
    tokenize(resume_text).into_iter().collect()
}
