//! Role compatibility — compares job-title terms with the candidate's role.

use serde::{Deserialize, Serialize};

use crate::matching::similarity::{comparable_similarity, overlaps, MAX_COMPARABLE_LEN};
use crate::matching::vocabulary::{is_stopword, ROLE_WORDS};

pub const ROLE_SIMILARITY_THRESHOLD: f64 = 0.7;
const MAX_ROLE_TERMS: usize = 10;

pub const FALLBACK_NEITHER: f64 = 0.30;
pub const FALLBACK_NO_TITLE: f64 = 0.50;
pub const FALLBACK_NO_ROLE: f64 = 0.20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleSimilarity {
    High,
    Medium,
    Low,
    None,
    /// A fallback constant was used because one side was missing.
    Unknown,
}

impl RoleSimilarity {
    fn from_score(score: f64) -> Self {
        match score {
            s if s > 0.7 => RoleSimilarity::High,
            s if s > 0.4 => RoleSimilarity::Medium,
            s if s > 0.0 => RoleSimilarity::Low,
            _ => RoleSimilarity::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleMatch {
    pub score: f64,
    pub similarity: RoleSimilarity,
    pub matched_terms: Vec<String>,
}

impl RoleMatch {
    fn fallback(score: f64) -> Self {
        Self {
            score,
            similarity: RoleSimilarity::Unknown,
            matched_terms: vec![],
        }
    }
}

/// Role-indicative terms: role vocabulary or plain alphabetic words, longer than two chars.
pub fn extract_role_terms(text: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for raw in text.split_whitespace() {
        let token = raw
            .trim_matches(|c: char| !c.is_alphanumeric() && c != '+' && c != '#')
            .to_lowercase();
        let len = token.chars().count();
        if len <= 2 || len > MAX_COMPARABLE_LEN || is_stopword(&token) {
            continue;
        }
        let qualifies =
            ROLE_WORDS.contains(&token.as_str()) || token.chars().all(char::is_alphabetic);
        if qualifies && !terms.contains(&token) {
            terms.push(token);
        }
        if terms.len() == MAX_ROLE_TERMS {
            break;
        }
    }
    terms
}

/// Fraction of job-title terms with a counterpart among the candidate's role terms.
pub fn role_compatibility(job_title: &str, candidate_role: &str) -> RoleMatch {
    let title_terms = extract_role_terms(job_title);
    let role_terms = extract_role_terms(candidate_role);

    match (title_terms.is_empty(), role_terms.is_empty()) {
        (true, true) => return RoleMatch::fallback(FALLBACK_NEITHER),
        (true, false) => return RoleMatch::fallback(FALLBACK_NO_TITLE),
        (false, true) => return RoleMatch::fallback(FALLBACK_NO_ROLE),
        (false, false) => {}
    }

    let matched_terms: Vec<String> = title_terms
        .iter()
        .filter(|term| {
            role_terms
                .iter()
                .any(|rt| {
                    overlaps(term, rt)
                        || comparable_similarity(term, rt, ROLE_SIMILARITY_THRESHOLD)
                            .is_some_and(|s| s >= ROLE_SIMILARITY_THRESHOLD)
                })
        })
        .cloned()
        .collect();

    let score = (matched_terms.len() as f64 / title_terms.len() as f64).clamp(0.0, 1.0);
    RoleMatch {
        score,
        similarity: RoleSimilarity::from_score(score),
        matched_terms,
    }
}
