//! Resume quality — additive heuristic over text length, structure and
//! technical density (technical terms per 100 words). Capped at 100.

use serde::{Deserialize, Serialize};

use crate::matching::vocabulary::{STRUCTURAL_KEYWORDS, TECHNICAL_TERMS};

const EXTRACTION_BONUS: u32 = 20;
const PROFILE_ONLY_FLOOR: u32 = 5;
const MAX_TECH_BONUS: u32 = 15;
const TECH_POINTS_PER_TERM: u32 = 3;
/// Technical terms per 100 words at which the full per-term bonus applies.
const FULL_TECH_DENSITY: f64 = 2.0;
const MAX_SKILLS_BONUS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityAssessment {
    /// In `[0, 100]`.
    pub score: u32,
    pub text_length: usize,
    pub structural_sections: usize,
    pub technical_terms: usize,
}

pub fn assess_quality(
    candidate_text: &str,
    profile_skills: &[String],
    candidate_role: &str,
    extraction_used: bool,
) -> QualityAssessment {
    let text = candidate_text.trim().to_lowercase();
    let text_length = text.chars().count();
    let has_profile = !profile_skills.is_empty() || !candidate_role.trim().is_empty();

    let length_bonus = match text_length {
        n if n >= 2000 => 30,
        n if n >= 1000 => 25,
        n if n >= 500 => 20,
        n if n >= 200 => 12,
        n if n > 0 => 6,
        _ if has_profile => PROFILE_ONLY_FLOOR,
        _ => 0,
    };

    let extraction_bonus = if extraction_used { EXTRACTION_BONUS } else { 0 };

    let structural_sections = STRUCTURAL_KEYWORDS
        .iter()
        .filter(|kw| text.contains(*kw))
        .count();
    let structure_bonus = match structural_sections {
        n if n >= 5 => 25,
        n if n >= 3 => 18,
        n if n >= 1 => 10,
        _ => 0,
    };

    let combined = format!("{text} {}", profile_skills.join(" ").to_lowercase());
    let technical_terms = TECHNICAL_TERMS
        .iter()
        .filter(|term| combined.contains(*term))
        .count();
    let tech_bonus = technical_bonus(technical_terms, combined.split_whitespace().count());

    let skills_bonus = (profile_skills.len() as u32 * 2).min(MAX_SKILLS_BONUS);

    let score =
        (length_bonus + extraction_bonus + structure_bonus + tech_bonus + skills_bonus).min(100);

    QualityAssessment {
        score,
        text_length,
        structural_sections,
        technical_terms,
    }
}

/// Per-term bonus, scaled down when the terms are sparse relative to the
/// amount of text. Capped at [`MAX_TECH_BONUS`].
fn technical_bonus(technical_terms: usize, word_count: usize) -> u32 {
    if technical_terms == 0 || word_count == 0 {
        return 0;
    }
    let density = technical_terms as f64 * 100.0 / word_count as f64;
    let scale = (density / FULL_TECH_DENSITY).min(1.0);
    let raw = (technical_terms as u32 * TECH_POINTS_PER_TERM).min(MAX_TECH_BONUS);
    (raw as f64 * scale).round() as u32
}
