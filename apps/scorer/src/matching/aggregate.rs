//! Score aggregation — runs the five analyzers, weights their scores and
//! derives a hiring recommendation.
//!
//! The aggregator is a pure function of its inputs: no I/O, no shared state.
//! Factor scores are rounded to whole points first and the final score is the
//! weighted sum of those rounded points.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matching::description::describe_match;
use crate::matching::experience::{assess_experience, ExperienceLevel};
use crate::matching::quality::assess_quality;
use crate::matching::role::{role_compatibility, RoleSimilarity};
use crate::matching::skills::{match_skills, SkillEvidence};
use crate::models::request::{CandidateProfile, JobRequirement};

// ────────────────────────────────────────────────────────────────────────────
// Weights
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skills: f64,
    pub description: f64,
    pub role: f64,
    pub experience: f64,
    pub quality: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 0.40,
            description: 0.25,
            role: 0.20,
            experience: 0.10,
            quality: 0.05,
        }
    }
}

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.skills + self.description + self.role + self.experience + self.quality
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Breakdown types
// ────────────────────────────────────────────────────────────────────────────

/// One factor's points (0–100), its weight and the evidence behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorScore<E> {
    pub score: u32,
    pub weight: f64,
    pub evidence: E,
}

impl<E> FactorScore<E> {
    fn from_ratio(ratio: f64, weight: f64, evidence: E) -> Self {
        Self::from_points((ratio * 100.0).round().clamp(0.0, 100.0) as u32, weight, evidence)
    }

    fn from_points(points: u32, weight: f64, evidence: E) -> Self {
        Self {
            score: points.min(100),
            weight,
            evidence,
        }
    }

    fn weighted(&self) -> f64 {
        self.score as f64 * self.weight
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillsEvidence {
    pub matched: usize,
    pub total: usize,
    pub per_skill: Vec<SkillEvidence>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionEvidence {
    pub keyword_matches: usize,
    pub total_keywords: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEvidence {
    pub candidate_level: ExperienceLevel,
    pub required_level: ExperienceLevel,
    pub years: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleEvidence {
    pub similarity: RoleSimilarity,
    pub matched_terms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityEvidence {
    pub text_length: usize,
    pub structural_sections: usize,
    pub technical_terms: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub skills_match: FactorScore<SkillsEvidence>,
    pub description_match: FactorScore<DescriptionEvidence>,
    pub experience_match: FactorScore<ExperienceEvidence>,
    pub role_match: FactorScore<RoleEvidence>,
    pub resume_quality: FactorScore<QualityEvidence>,
}

impl Breakdown {
    pub fn weighted_total(&self) -> f64 {
        self.skills_match.weighted()
            + self.description_match.weighted()
            + self.experience_match.weighted()
            + self.role_match.weighted()
            + self.resume_quality.weighted()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoringError {
    #[error("Breakdown is missing the {0} factor")]
    MissingFactor(&'static str),
}

/// Assembles a [`Breakdown`] one factor at a time; `build` fails if any factor is absent.
#[derive(Debug, Default)]
pub struct BreakdownBuilder {
    skills_match: Option<FactorScore<SkillsEvidence>>,
    description_match: Option<FactorScore<DescriptionEvidence>>,
    experience_match: Option<FactorScore<ExperienceEvidence>>,
    role_match: Option<FactorScore<RoleEvidence>>,
    resume_quality: Option<FactorScore<QualityEvidence>>,
}

impl BreakdownBuilder {
    pub fn skills(mut self, factor: FactorScore<SkillsEvidence>) -> Self {
        self.skills_match = Some(factor);
        self
    }

    pub fn description(mut self, factor: FactorScore<DescriptionEvidence>) -> Self {
        self.description_match = Some(factor);
        self
    }

    pub fn experience(mut self, factor: FactorScore<ExperienceEvidence>) -> Self {
        self.experience_match = Some(factor);
        self
    }

    pub fn role(mut self, factor: FactorScore<RoleEvidence>) -> Self {
        self.role_match = Some(factor);
        self
    }

    pub fn quality(mut self, factor: FactorScore<QualityEvidence>) -> Self {
        self.resume_quality = Some(factor);
        self
    }

    pub fn build(self) -> Result<Breakdown, ScoringError> {
        Ok(Breakdown {
            skills_match: self.skills_match.ok_or(ScoringError::MissingFactor("skills"))?,
            description_match: self
                .description_match
                .ok_or(ScoringError::MissingFactor("description"))?,
            experience_match: self
                .experience_match
                .ok_or(ScoringError::MissingFactor("experience"))?,
            role_match: self.role_match.ok_or(ScoringError::MissingFactor("role"))?,
            resume_quality: self
                .resume_quality
                .ok_or(ScoringError::MissingFactor("quality"))?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub final_score: u32,
    pub breakdown: Breakdown,
    pub matched_skills: Vec<String>,
    pub recommendation: String,
    pub extraction_used: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregation
// ────────────────────────────────────────────────────────────────────────────

/// Scores one candidate against one job.
///
/// `candidate_text` is the extracted resume text when extraction succeeded,
/// otherwise the candidate's bio.
pub fn aggregate(
    job: &JobRequirement,
    candidate: &CandidateProfile,
    candidate_text: &str,
    extraction_used: bool,
) -> Result<ScoreResult, ScoringError> {
    let weights = ScoringWeights::default();

    let skills = match_skills(&job.required_skills, &candidate.skills, candidate_text);
    let description = describe_match(&job.description, candidate_text);
    let experience_text = format!("{candidate_text} {}", candidate.role);
    let experience = assess_experience(&job.level, &experience_text);
    let role = role_compatibility(&job.title, &candidate.role);
    let quality = assess_quality(candidate_text, &candidate.skills, &candidate.role, extraction_used);

    let breakdown = BreakdownBuilder::default()
        .skills(FactorScore::from_ratio(
            skills.score,
            weights.skills,
            SkillsEvidence {
                matched: skills.matched.len(),
                total: job.required_skills.len(),
                per_skill: skills.evidence,
            },
        ))
        .description(FactorScore::from_ratio(
            description.score,
            weights.description,
            DescriptionEvidence {
                keyword_matches: description.matched_keyword_count,
                total_keywords: description.total_keywords,
            },
        ))
        .experience(FactorScore::from_ratio(
            experience.score,
            weights.experience,
            ExperienceEvidence {
                candidate_level: experience.candidate_level,
                required_level: experience.required_level,
                years: experience.years_detected,
            },
        ))
        .role(FactorScore::from_ratio(
            role.score,
            weights.role,
            RoleEvidence {
                similarity: role.similarity,
                matched_terms: role.matched_terms,
            },
        ))
        .quality(FactorScore::from_points(
            quality.score,
            weights.quality,
            QualityEvidence {
                text_length: quality.text_length,
                structural_sections: quality.structural_sections,
                technical_terms: quality.technical_terms,
            },
        ))
        .build()?;

    let final_score = breakdown.weighted_total().round().clamp(0.0, 100.0) as u32;
    let recommendation = recommend(final_score, &breakdown);

    Ok(ScoreResult {
        final_score,
        breakdown,
        matched_skills: skills.matched,
        recommendation,
        extraction_used,
    })
}

/// The scoring step as seen by the orchestrator.
///
/// Carried as `Arc<dyn Scorer>` so the invocation path can be exercised with
/// alternative scorers.
pub trait Scorer: Send + Sync {
    fn score(
        &self,
        job: &JobRequirement,
        candidate: &CandidateProfile,
        candidate_text: &str,
        extraction_used: bool,
    ) -> Result<ScoreResult, ScoringError>;
}

/// Default scorer: the fixed-weight five-factor [`aggregate`].
pub struct WeightedScorer;

impl Scorer for WeightedScorer {
    fn score(
        &self,
        job: &JobRequirement,
        candidate: &CandidateProfile,
        candidate_text: &str,
        extraction_used: bool,
    ) -> Result<ScoreResult, ScoringError> {
        aggregate(job, candidate, candidate_text, extraction_used)
    }
}

/// Maps the final score to a recommendation band, annotated with flags for
/// individually weak factors.
pub fn recommend(final_score: u32, breakdown: &Breakdown) -> String {
    let band = match final_score {
        s if s >= 85 => "EXCELLENT MATCH - Highly recommended for interview",
        s if s >= 70 => "STRONG CANDIDATE - Recommended",
        s if s >= 55 => "MODERATE FIT - Consider for screening",
        s if s >= 40 => "WEAK FIT - Manual review advised",
        _ => "POOR MATCH - Not recommended",
    };

    let mut flags = Vec::new();
    if breakdown.skills_match.score < 50 {
        flags.push("Skills gap identified");
    }
    if breakdown.experience_match.score < 60 {
        flags.push("Experience level mismatch");
    }
    if breakdown.role_match.score < 40 {
        flags.push("Role alignment issues");
    }

    if flags.is_empty() {
        band.to_string()
    } else {
        format!("{band} | {}", flags.join(", "))
    }
}
