//! Callback payloads delivered to the requesting backend.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::matching::aggregate::{Breakdown, ScoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSource {
    Extracted,
    Bio,
}

/// How the candidate text was obtained, reported alongside the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingInfo {
    pub resume_provided: bool,
    pub extraction_used: bool,
    pub text_source: TextSource,
    pub candidate_text_length: usize,
    pub total_required_skills: usize,
    pub total_user_skills: usize,
    pub processed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorePayload {
    pub application_id: String,
    pub score: u32,
    pub breakdown: Breakdown,
    pub matched_skills: Vec<String>,
    pub recommendation: String,
    pub extraction_used: bool,
    pub processing_info: ProcessingInfo,
}

impl ScorePayload {
    pub fn new(application_id: &str, result: ScoreResult, processing_info: ProcessingInfo) -> Self {
        Self {
            application_id: application_id.to_string(),
            score: result.final_score,
            breakdown: result.breakdown,
            matched_skills: result.matched_skills,
            recommendation: result.recommendation,
            extraction_used: result.extraction_used,
            processing_info,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The aggregator returned an error.
    ScoringFailed,
    /// The scoring task panicked or was cancelled.
    ScoringPanicked,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::ScoringFailed => "ScoringFailed",
            ErrorKind::ScoringPanicked => "ScoringPanicked",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorReport {
    pub application_id: String,
    pub kind: ErrorKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorReport {
    pub fn new(application_id: &str, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            application_id: application_id.to_string(),
            kind,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    pub error_type: String,
    pub error_message: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub application_id: String,
    pub error: bool,
    pub error_details: ErrorDetails,
}

impl From<&ErrorReport> for ErrorPayload {
    fn from(report: &ErrorReport) -> Self {
        Self {
            application_id: report.application_id.clone(),
            error: true,
            error_details: ErrorDetails {
                error_type: report.kind.as_str().to_string(),
                error_message: report.message.clone(),
                timestamp: report.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            },
        }
    }
}

/// One of the two shapes the callback endpoint accepts, keyed by `applicationId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CallbackPayload {
    Failure(ErrorPayload),
    Success(Box<ScorePayload>),
}

impl CallbackPayload {
    pub fn application_id(&self) -> &str {
        match self {
            CallbackPayload::Success(p) => &p.application_id,
            CallbackPayload::Failure(p) => &p.application_id,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CallbackPayload::Failure(_))
    }
}
