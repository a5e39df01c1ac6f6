//! Description relevance — keyword overlap between the job description and
//! the candidate's text.

use serde::{Deserialize, Serialize};

use crate::matching::keywords::extract_keywords;
use crate::matching::similarity::{comparable_similarity, overlaps};

pub const DESCRIPTION_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Neither side has text to compare.
pub const FALLBACK_NEITHER: f64 = 0.25;
/// No job description, but the candidate still has evaluable content.
pub const FALLBACK_NO_DESCRIPTION: f64 = 0.40;
/// A job description exists but the candidate supplied no text.
pub const FALLBACK_NO_CANDIDATE_TEXT: f64 = 0.15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptionMatch {
    pub score: f64,
    pub matched_keyword_count: usize,
    pub total_keywords: usize,
}

impl DescriptionMatch {
    fn fallback(score: f64) -> Self {
        Self {
            score,
            matched_keyword_count: 0,
            total_keywords: 0,
        }
    }
}

/// Fraction of job-description keywords evidenced in the candidate text.
pub fn describe_match(job_description: &str, candidate_text: &str) -> DescriptionMatch {
    let job_keywords = extract_keywords(job_description);
    let candidate_keywords = extract_keywords(candidate_text);

    match (job_keywords.is_empty(), candidate_keywords.is_empty()) {
        (true, true) => return DescriptionMatch::fallback(FALLBACK_NEITHER),
        (true, false) => return DescriptionMatch::fallback(FALLBACK_NO_DESCRIPTION),
        (false, true) => return DescriptionMatch::fallback(FALLBACK_NO_CANDIDATE_TEXT),
        (false, false) => {}
    }

    let text = candidate_text.to_lowercase();
    let matched = job_keywords
        .iter()
        .filter(|kw| {
            text.contains(kw.as_str())
                || candidate_keywords.iter().any(|ck| {
                    overlaps(kw, ck)
                        || comparable_similarity(kw, ck, DESCRIPTION_SIMILARITY_THRESHOLD)
                            .is_some_and(|s| s > DESCRIPTION_SIMILARITY_THRESHOLD)
                })
        })
        .count();

    DescriptionMatch {
        score: (matched as f64 / job_keywords.len() as f64).clamp(0.0, 1.0),
        matched_keyword_count: matched,
        total_keywords: job_keywords.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_data_fallbacks_are_exact() {
        assert_eq!(describe_match("", "").score, FALLBACK_NEITHER);
        assert_eq!(describe_match("", "rust developer").score, FALLBACK_NO_DESCRIPTION);
        assert_eq!(describe_match("rust developer", "  ").score, FALLBACK_NO_CANDIDATE_TEXT);
    }

    #[test]
    fn test_fallbacks_are_not_zero() {
        for score in [FALLBACK_NEITHER, FALLBACK_NO_DESCRIPTION, FALLBACK_NO_CANDIDATE_TEXT] {
            assert!(score > 0.0);
        }
    }

    #[test]
    fn test_full_overlap_scores_one() {
        let result = describe_match("Rust microservices", "I write rust microservices daily");
        assert_eq!(result.score, 1.0);
        assert_eq!(result.matched_keyword_count, result.total_keywords);
    }

    #[test]
    fn test_partial_overlap() {
        let result = describe_match("kafka. rust.", "rust only");
        assert_eq!(result.total_keywords, 2);
        assert_eq!(result.matched_keyword_count, 1);
        assert!((result.score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_fuzzy_keyword_counts() {
        let result = describe_match("kubernetes", "kubernets admin");
        assert_eq!(result.matched_keyword_count, 1);
    }

    #[test]
    fn test_long_unbroken_runs_finish_quickly() {
        let job = format!("rust {}b", "a".repeat(100_000));
        let candidate = format!("rust {}c", "a".repeat(100_000));
        let started = std::time::Instant::now();
        let result = describe_match(&job, &candidate);
        assert!(started.elapsed() < std::time::Duration::from_secs(2));
        assert_eq!(result.total_keywords, 1);
        assert_eq!(result.matched_keyword_count, 1);
    }

    #[test]
    fn test_score_is_bounded() {
        let result = describe_match(
            "Senior backend engineer building APIs with Rust, Postgres and Kafka.",
            "Backend engineer. Rust. Postgres. APIs. Kafka. Senior.",
        );
        assert!((0.0..=1.0).contains(&result.score));
    }
}
