//! Skill matching — resolves each required skill against profile skills and
//! resume text, with synonym expansion and fuzzy comparison.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::matching::similarity::{comparable_similarity, contains_meaningful, overlaps};
use crate::matching::vocabulary::synonym_groups;

pub const SKILL_SIMILARITY_THRESHOLD: f64 = 0.8;

const BOTH_SCORE: f64 = 1.0;
const PROFILE_ONLY_SCORE: f64 = 0.85;
const TEXT_ONLY_SCORE: f64 = 0.7;

/// Used when the job lists no required skills.
pub const NO_REQUIREMENTS_WITH_SKILLS: f64 = 0.6;
pub const NO_REQUIREMENTS_WITHOUT_SKILLS: f64 = 0.4;

/// Where the evidence for a required skill was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Both,
    Profile,
    Text,
    None,
}

impl MatchType {
    fn from_evidence(in_profile: bool, in_text: bool) -> Self {
        match (in_profile, in_text) {
            (true, true) => MatchType::Both,
            (true, false) => MatchType::Profile,
            (false, true) => MatchType::Text,
            (false, false) => MatchType::None,
        }
    }

    pub fn score(self) -> f64 {
        match self {
            MatchType::Both => BOTH_SCORE,
            MatchType::Profile => PROFILE_ONLY_SCORE,
            MatchType::Text => TEXT_ONLY_SCORE,
            MatchType::None => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEvidence {
    pub skill: String,
    pub match_type: MatchType,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    /// Mean of per-skill scores, in `[0, 1]`.
    pub score: f64,
    /// Required skills with any evidence, in the order they were required.
    pub matched: Vec<String>,
    pub evidence: Vec<SkillEvidence>,
}

/// Scores `required` skills against the candidate's listed skills and free text.
pub fn match_skills(required: &[String], profile_skills: &[String], candidate_text: &str) -> SkillMatch {
    if required.is_empty() {
        let score = if profile_skills.iter().any(|s| !s.trim().is_empty()) {
            NO_REQUIREMENTS_WITH_SKILLS
        } else {
            NO_REQUIREMENTS_WITHOUT_SKILLS
        };
        return SkillMatch {
            score,
            matched: vec![],
            evidence: vec![],
        };
    }

    let text = candidate_text.to_lowercase();
    let profile: Vec<String> = profile_skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    let evidence: Vec<SkillEvidence> = required
        .iter()
        .map(|skill| {
            let variations = skill_variations(skill);
            let in_profile = profile
                .iter()
                .any(|p| variations.iter().any(|v| profile_matches(p, v)));
            let in_text = variations.iter().any(|v| text_mentions(&text, v));
            let match_type = MatchType::from_evidence(in_profile, in_text);
            SkillEvidence {
                skill: skill.clone(),
                match_type,
                score: match_type.score(),
            }
        })
        .collect();

    let total: f64 = evidence.iter().map(|e| e.score).sum();
    let matched = evidence
        .iter()
        .filter(|e| e.match_type != MatchType::None)
        .map(|e| e.skill.clone())
        .collect();

    SkillMatch {
        score: (total / evidence.len() as f64).clamp(0.0, 1.0),
        matched,
        evidence,
    }
}

/// The skill itself plus every alias from the synonym groups it belongs to.
pub fn skill_variations(skill: &str) -> BTreeSet<String> {
    let skill = skill.trim().to_lowercase();
    let mut variations: BTreeSet<String> = synonym_groups(&skill)
        .flat_map(|group| group.iter().map(|alias| alias.to_string()))
        .collect();
    if !skill.is_empty() {
        variations.insert(skill);
    }
    variations
}

fn profile_matches(profile_skill: &str, variation: &str) -> bool {
    overlaps(profile_skill, variation)
        || comparable_similarity(profile_skill, variation, SKILL_SIMILARITY_THRESHOLD)
            .is_some_and(|s| s > SKILL_SIMILARITY_THRESHOLD)
}

fn text_mentions(text: &str, variation: &str) -> bool {
    if variation.chars().count() >= 3 {
        return contains_meaningful(text, variation);
    }
    contains_whole_word(text, variation)
}

static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}+#.\-/]+").expect("word regex is valid"));

fn contains_whole_word(text: &str, word: &str) -> bool {
    WORD_RE
        .find_iter(text)
        .any(|m| m.as_str().trim_end_matches(['.', '-']) == word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_profile_only_and_unmatched_skills() {
        let result = match_skills(
            &strings(&["React", "Node.js"]),
            &strings(&["react", "javascript"]),
            "",
        );
        assert!(result.evidence[0].score >= 0.85);
        assert_eq!(result.evidence[0].match_type, MatchType::Profile);
        assert_eq!(result.evidence[1].score, 0.0);
        assert!((result.score - 0.425).abs() < 1e-9, "score was {}", result.score);
        assert_eq!(result.matched, strings(&["React"]));
    }

    #[test]
    fn test_match_in_both_scores_full() {
        let result = match_skills(
            &strings(&["Python"]),
            &strings(&["python"]),
            "Built data pipelines in Python for 3 years",
        );
        assert_eq!(result.evidence[0].match_type, MatchType::Both);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_text_only_match() {
        let result = match_skills(&strings(&["Docker"]), &[], "Shipped services with docker compose");
        assert_eq!(result.evidence[0].match_type, MatchType::Text);
        assert!((result.score - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_synonym_expansion_matches_alias() {
        let result = match_skills(&strings(&["JavaScript"]), &strings(&["JS"]), "");
        assert_eq!(result.evidence[0].match_type, MatchType::Profile);

        let result = match_skills(&strings(&["Kubernetes"]), &[], "deployed on k8s clusters");
        assert_eq!(result.evidence[0].match_type, MatchType::Text);
    }

    #[test]
    fn test_fuzzy_profile_match() {
        let result = match_skills(&strings(&["PostgreSQL"]), &strings(&["postgressql"]), "");
        assert_eq!(result.evidence[0].match_type, MatchType::Profile);
    }

    #[test]
    fn test_short_skill_needs_whole_word_in_text() {
        let result = match_skills(&strings(&["R"]), &[], "worked on react and redux");
        assert_eq!(result.evidence[0].match_type, MatchType::None);

        let result = match_skills(&strings(&["R"]), &[], "statistics in r and python");
        assert_eq!(result.evidence[0].match_type, MatchType::Text);
    }

    #[test]
    fn test_short_skill_not_found_inside_accented_word() {
        let result = match_skills(&strings(&["R"]), &[], "rétro gaming fan");
        assert_eq!(result.evidence[0].match_type, MatchType::None);
    }

    #[test]
    fn test_oversized_skills_are_compared_quickly() {
        let required = vec![format!("{}b", "a".repeat(100_000))];
        let profile = vec![format!("{}c", "a".repeat(100_000))];
        let started = std::time::Instant::now();
        let result = match_skills(&required, &profile, "");
        assert!(started.elapsed() < std::time::Duration::from_secs(2));
        assert_eq!(result.evidence[0].match_type, MatchType::None);
    }

    #[test]
    fn test_empty_requirements_use_fallback() {
        let with_skills = match_skills(&[], &strings(&["rust"]), "");
        assert_eq!(with_skills.score, NO_REQUIREMENTS_WITH_SKILLS);
        assert!(with_skills.score > 0.0);

        let without = match_skills(&[], &[], "");
        assert_eq!(without.score, NO_REQUIREMENTS_WITHOUT_SKILLS);
        assert!(without.matched.is_empty());
    }

    #[test]
    fn test_adding_profile_skill_is_monotonic_without_text() {
        let profile = strings(&["react", "rust"]);
        let before = match_skills(&strings(&["React", "Go"]), &profile, "");
        let after = match_skills(&strings(&["React", "Go", "Rust"]), &profile, "");
        assert!(after.score >= before.score);
    }

    #[test]
    fn test_adding_skill_evidenced_everywhere_is_monotonic() {
        let profile = strings(&["react", "rust"]);
        let text = "react and rust in production";
        let before = match_skills(&strings(&["React"]), &profile, text);
        let after = match_skills(&strings(&["React", "Rust"]), &profile, text);
        assert!(after.score >= before.score);
    }

    #[test]
    fn test_matched_is_subset_of_required() {
        let required = strings(&["Rust", "Go", "Kafka"]);
        let result = match_skills(&required, &strings(&["golang"]), "rust services");
        assert!(result.matched.iter().all(|m| required.contains(m)));
    }

    #[test]
    fn test_variations_include_skill_and_aliases() {
        let variations = skill_variations("Node.js");
        assert!(variations.contains("node.js"));
        assert!(variations.contains("nodejs"));
        assert!(variations.contains("node"));
    }
}
