//! Match Scoring — pluggable, trait-based scorer that measures resume text vs job text.
//!
//! Default: `KeywordMatchScorer` (lexical overlap, deterministic, no I/O).
//!
//! `AppState` holds an `Arc<dyn MatchScorer>`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::matching::tokenizer::{extract_keywords, token_set};

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// Result of matching one resume against one job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    pub score: u8, // 0 – 100
    /// Job keywords also present in the resume, in job-text order.
    pub matched_keywords: Vec<String>,
}

/// Badge band rendered next to a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Strong,
    Moderate,
    Weak,
}

impl MatchTier {
    pub fn from_score(score: u8) -> Self {
        if score >= 70 {
            MatchTier::Strong
        } else if score >= 40 {
            MatchTier::Moderate
        } else {
            MatchTier::Weak
        }
    }
}

impl MatchScore {
    pub fn tier(&self) -> MatchTier {
        MatchTier::from_score(self.score)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends without touching handlers.
///
/// Carried in `AppState` as `Arc<dyn MatchScorer>`.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn score(&self, resume_text: &str, job_text: &str) -> MatchScore;

    /// Short label for logs.
    fn backend(&self) -> &'static str;
}

/// Keyword-overlap scorer.
///
/// Algorithm:
/// 1. K = ordered, deduplicated job keywords (see `tokenizer::extract_keywords`)
/// 2. R = set of resume tokens
/// 3. matched = [k in K if k in R], keeping K's order
/// 4. score = round(100 × |matched| / |K|) (halves up), 0 when K is empty
pub struct KeywordMatchScorer;

#[async_trait]
impl MatchScorer for KeywordMatchScorer {
    async fn score(&self, resume_text: &str, job_text: &str) -> MatchScore {
        compute_match_score(resume_text, job_text)
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core keyword match algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Scores `resume_text` against `job_text`. Total over all input.
pub fn compute_match_score(resume_text: &str, job_text: &str) -> MatchScore {
    let keywords = extract_keywords(job_text);
    if keywords.is_empty() {
        return MatchScore::default();
    }

    let resume_tokens = token_set(resume_text);
    let total = keywords.len();

    let matched_keywords: Vec<String> = keywords
        .into_iter()
        .filter(|keyword| resume_tokens.contains(keyword))
        .collect();

    let score = percent_half_up(matched_keywords.len(), total);

    MatchScore {
        score,
        matched_keywords,
    }
}

/// round(100 × matched / total) in integer math, halves rounding up.
/// `matched <= total` keeps the result in 0..=100.
fn percent_half_up(matched: usize, total: usize) -> u8 {
    ((200 * matched + total) / (2 * total)).min(100) as u8
}

/// Joins a job's description and optional requirements into the scored text.
pub fn job_text(description: &str, requirements: Option<&str>) -> String {
    match requirements.map(str::trim).filter(|r| !r.is_empty()) {
        Some(requirements) => format!("{description}\n\n{requirements}"),
        None => description.to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const JOB: &str = "Senior Rust engineer. Requirements: Rust, Kubernetes, PostgreSQL, Kafka and gRPC.";

    #[test]
    fn test_empty_job_text_scores_zero() {
        let result = compute_match_score("Rust expert with Kafka", "");
        assert_eq!(result, MatchScore::default());
    }

    #[test]
    fn test_job_text_without_keywords_scores_zero() {
        let result = compute_match_score("the and for", "the and for, to be or not to be");
        assert_eq!(result.score, 0);
        assert!(result.matched_keywords.is_empty());
    }

    #[test]
    fn test_empty_resume_matches_nothing() {
        let result = compute_match_score("", "Python Engineer role requiring Python and SQL");
        assert_eq!(result.score, 0);
        assert!(result.matched_keywords.is_empty());
    }

    #[test]
    fn test_partial_match_exact_set_and_score() {
        let result = compute_match_score("Experienced Python SQL engineer", "Python SQL engineer needed");
        assert_eq!(result.matched_keywords, vec!["python", "sql", "engineer"]);
        // 3 of 4 keywords ("needed" is missing)
        assert_eq!(result.score, 75);
    }

    #[test]
    fn test_full_match_scores_100() {
        let result = compute_match_score("python sql engineer needed", "Python SQL engineer needed");
        assert_eq!(result.score, 100);
        assert_eq!(result.matched_keywords.len(), 4);
    }

    #[test]
    fn test_case_insensitive() {
        let result = compute_match_score("PYTHON developer", "Python Developer role");
        assert_eq!(result.matched_keywords, vec!["python", "developer"]);
        assert_eq!(result.score, 67);
    }

    #[test]
    fn test_matched_keywords_follow_job_order() {
        let result = compute_match_score("kafka postgresql kubernetes rust", JOB);
        assert_eq!(
            result.matched_keywords,
            vec!["rust", "kubernetes", "postgresql", "kafka"]
        );
    }

    #[test]
    fn test_deterministic() {
        let resume = "Rust, Kafka, some Kubernetes";
        assert_eq!(compute_match_score(resume, JOB), compute_match_score(resume, JOB));
    }

    #[test]
    fn test_adding_a_job_keyword_never_lowers_score() {
        let base = "I write Rust";
        let before = compute_match_score(base, JOB).score;
        let after = compute_match_score(&format!("{base} and Kafka"), JOB).score;
        assert!(after >= before, "{after} < {before}");
        assert!(after > before);
    }

    #[test]
    fn test_stopwords_never_matched() {
        let result = compute_match_score("the and for with rust", "the and for with rust");
        assert_eq!(result.matched_keywords, vec!["rust"]);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_no_stemming() {
        let result = compute_match_score("engineering", "engineer");
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_repeated_job_keyword_does_not_inflate_denominator() {
        let result = compute_match_score("rust", "rust rust rust kafka");
        assert_eq!(result.score, 50);
    }

    #[test]
    fn test_rounding_halves_up() {
        // 1 of 8 = 12.5%
        let job = "alpha bravo charlie delta echo foxtrot golf hotel";
        assert_eq!(compute_match_score("alpha", job).score, 13);
        // 1 of 3 = 33.3%
        assert_eq!(compute_match_score("alpha", "alpha bravo charlie").score, 33);
    }

    fn numbered_words(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("kw{i:04}")).collect()
    }

    #[test]
    fn test_exact_half_ratios_round_up() {
        // 23 of 40 = 57.5%, 29 of 200 = 14.5%: both lose the half in f64 division
        let words = numbered_words(200);
        let job_40 = words[..40].join(" ");
        assert_eq!(compute_match_score(&words[..23].join(" "), &job_40).score, 58);

        let job_200 = words.join(" ");
        assert_eq!(compute_match_score(&words[..29].join(" "), &job_200).score, 15);
    }

    #[test]
    fn test_percent_half_up_bounds() {
        assert_eq!(percent_half_up(0, 7), 0);
        assert_eq!(percent_half_up(7, 7), 100);
        assert_eq!(percent_half_up(1, 2), 50);
        assert_eq!(percent_half_up(1, 200), 1);
        assert_eq!(percent_half_up(2, 3), 67);
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(MatchTier::from_score(100), MatchTier::Strong);
        assert_eq!(MatchTier::from_score(70), MatchTier::Strong);
        assert_eq!(MatchTier::from_score(69), MatchTier::Moderate);
        assert_eq!(MatchTier::from_score(40), MatchTier::Moderate);
        assert_eq!(MatchTier::from_score(39), MatchTier::Weak);
        assert_eq!(MatchTier::from_score(0), MatchTier::Weak);
    }

    #[test]
    fn test_job_text_joins_requirements() {
        assert_eq!(job_text("Build things", Some("Rust")), "Build things\n\nRust");
        assert_eq!(job_text("Build things", Some("   ")), "Build things");
        assert_eq!(job_text("Build things", None), "Build things");
    }

    #[tokio::test]
    async fn test_keyword_scorer_backend_matches_free_function() {
        let scorer = KeywordMatchScorer;
        let resume = "Rust and Kafka";
        assert_eq!(scorer.score(resume, JOB).await, compute_match_score(resume, JOB));
        assert_eq!(scorer.backend(), "keyword");
    }
}
