//! Experience level detection — infers an ordinal seniority from free text and
//! compares it with the level the job asks for.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::matching::vocabulary::LEADERSHIP_WORDS;
use crate::matching::years::YearsPatternMatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry = 1,
    Junior = 2,
    Mid = 3,
    Senior = 4,
    Lead = 5,
    Principal = 6,
    Director = 7,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 7] = [
        ExperienceLevel::Entry,
        ExperienceLevel::Junior,
        ExperienceLevel::Mid,
        ExperienceLevel::Senior,
        ExperienceLevel::Lead,
        ExperienceLevel::Principal,
        ExperienceLevel::Director,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Lead => "lead",
            ExperienceLevel::Principal => "principal",
            ExperienceLevel::Director => "director",
        }
    }

    /// Case-insensitive lookup of a level name.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        Self::ALL.into_iter().find(|level| level.name() == value)
    }

    /// The level a job asks for; unknown or empty values mean "mid".
    pub fn required(value: &str) -> Self {
        Self::parse(value).unwrap_or(ExperienceLevel::Mid)
    }

    pub fn from_years(years: u32) -> Option<Self> {
        match years {
            y if y >= 10 => Some(ExperienceLevel::Principal),
            y if y >= 7 => Some(ExperienceLevel::Lead),
            y if y >= 4 => Some(ExperienceLevel::Senior),
            y if y >= 2 => Some(ExperienceLevel::Mid),
            y if y >= 1 => Some(ExperienceLevel::Junior),
            _ => None,
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static LEVEL_WORD_RE: Lazy<Regex> = Lazy::new(|| {
    let names: Vec<&str> = ExperienceLevel::ALL.iter().map(|l| l.name()).collect();
    Regex::new(&format!(r"\b({})\b", names.join("|"))).expect("level regex is valid")
});

static LEADERSHIP_RE: Lazy<Regex> = Lazy::new(|| {
    let words: Vec<String> = LEADERSHIP_WORDS.iter().map(|w| regex::escape(w)).collect();
    Regex::new(&format!(r"\b(?:{})\b", words.join("|"))).expect("leadership regex is valid")
});

/// Detected seniority plus the signals that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDetection {
    pub level: ExperienceLevel,
    pub years: Option<u32>,
    pub leadership_signal: bool,
}

/// Infers the candidate's level from explicit level words, "N years"
/// phrases and leadership titles. Defaults to junior when nothing is found.
pub fn detect_candidate_level(text: &str) -> LevelDetection {
    let text = text.to_lowercase();

    let from_words = LEVEL_WORD_RE
        .captures_iter(&text)
        .filter_map(|caps| ExperienceLevel::parse(caps.get(1)?.as_str()))
        .max();

    let years = YearsPatternMatcher::standard().max_years(&text);
    let from_years = years.and_then(ExperienceLevel::from_years);

    let leadership_signal = LEADERSHIP_RE.is_match(&text);
    let from_leadership = leadership_signal.then_some(ExperienceLevel::Lead);

    let level = [from_words, from_years, from_leadership]
        .into_iter()
        .flatten()
        .max()
        .unwrap_or(ExperienceLevel::Junior);

    LevelDetection {
        level,
        years,
        leadership_signal,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceMatch {
    /// In `[0, 1]`.
    pub score: f64,
    pub required_level: ExperienceLevel,
    pub candidate_level: ExperienceLevel,
    pub years_detected: Option<u32>,
}

/// Score by absolute ordinal distance; over- and under-qualification decay alike.
pub fn level_distance_score(required: ExperienceLevel, candidate: ExperienceLevel) -> f64 {
    match required.ordinal().abs_diff(candidate.ordinal()) {
        0 => 1.0,
        1 => 0.85,
        2 => 0.65,
        _ => 0.45,
    }
}

pub fn assess_experience(job_level: &str, candidate_text: &str) -> ExperienceMatch {
    let required_level = ExperienceLevel::required(job_level);
    let detection = detect_candidate_level(candidate_text);
    ExperienceMatch {
        score: level_distance_score(required_level, detection.level),
        required_level,
        candidate_level: detection.level,
        years_detected: detection.years,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_level_parsing() {
        assert_eq!(ExperienceLevel::required("Senior"), ExperienceLevel::Senior);
        assert_eq!(ExperienceLevel::required("DIRECTOR"), ExperienceLevel::Director);
        assert_eq!(ExperienceLevel::required("wizard"), ExperienceLevel::Mid);
        assert_eq!(ExperienceLevel::required(""), ExperienceLevel::Mid);
    }

    #[test]
    fn test_years_bands() {
        assert_eq!(ExperienceLevel::from_years(0), None);
        assert_eq!(ExperienceLevel::from_years(1), Some(ExperienceLevel::Junior));
        assert_eq!(ExperienceLevel::from_years(3), Some(ExperienceLevel::Mid));
        assert_eq!(ExperienceLevel::from_years(5), Some(ExperienceLevel::Senior));
        assert_eq!(ExperienceLevel::from_years(7), Some(ExperienceLevel::Lead));
        assert_eq!(ExperienceLevel::from_years(12), Some(ExperienceLevel::Principal));
    }

    #[test]
    fn test_five_years_matches_senior_exactly() {
        let result = assess_experience("senior", "5 years of experience");
        assert_eq!(result.candidate_level, ExperienceLevel::Senior);
        assert_eq!(result.required_level, ExperienceLevel::Senior);
        assert_eq!(result.years_detected, Some(5));
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_default_is_junior() {
        let detection = detect_candidate_level("I enjoy writing software");
        assert_eq!(detection.level, ExperienceLevel::Junior);
        assert_eq!(detection.years, None);
    }

    #[test]
    fn test_level_words_take_maximum() {
        let detection = detect_candidate_level("Junior developer promoted to Senior engineer");
        assert_eq!(detection.level, ExperienceLevel::Senior);
    }

    #[test]
    fn test_level_words_are_whole_words() {
        // "midnight" must not count as "mid", "seniority" not as "senior".
        let detection = detect_candidate_level("midnight deploys, seniority matters");
        assert_eq!(detection.level, ExperienceLevel::Junior);
    }

    #[test]
    fn test_leadership_raises_floor() {
        let detection = detect_candidate_level("Engineering Manager for a platform team");
        assert!(detection.leadership_signal);
        assert_eq!(detection.level, ExperienceLevel::Lead);
    }

    #[test]
    fn test_decay_is_symmetric() {
        use ExperienceLevel::*;
        assert_eq!(level_distance_score(Mid, Senior), level_distance_score(Senior, Mid));
        assert_eq!(level_distance_score(Entry, Director), level_distance_score(Director, Entry));
    }

    #[test]
    fn test_decay_table() {
        use ExperienceLevel::*;
        assert_eq!(level_distance_score(Senior, Senior), 1.0);
        assert_eq!(level_distance_score(Senior, Lead), 0.85);
        assert_eq!(level_distance_score(Senior, Junior), 0.65);
        assert_eq!(level_distance_score(Senior, Entry), 0.45);
        assert_eq!(level_distance_score(Entry, Director), 0.45);
    }

    #[test]
    fn test_unknown_job_level_defaults_to_mid() {
        let result = assess_experience("", "3 years of experience");
        assert_eq!(result.required_level, ExperienceLevel::Mid);
        assert_eq!(result.score, 1.0);
    }
}
