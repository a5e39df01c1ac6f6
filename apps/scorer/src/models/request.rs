//! Scoring request types and their lenient decoding.
//!
//! Optional fields that are absent or of the wrong JSON type fall back to
//! empty defaults. Only the correlation id and the callback target are
//! mandatory.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequirement {
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: String,
    pub level: String,
    pub salary: String,
    pub required_skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    pub skills: Vec<String>,
    pub bio: String,
    pub role: String,
    pub resume_reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringRequest {
    pub job: JobRequirement,
    pub candidate: CandidateProfile,
    pub application_id: String,
    pub callback_target: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Request body is not valid JSON: {0}")]
    MalformedBody(String),

    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("applicationId is missing")]
    MissingApplicationId,

    #[error("No callback target: backendUrl is missing and no default is configured")]
    MissingCallbackTarget,
}

/// Fields the orchestrator can still recover when the request as a whole is
/// rejected, used to decide whether a callback is possible at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Correlation {
    pub application_id: Option<String>,
    pub callback_target: Option<String>,
}

impl ScoringRequest {
    /// Decodes a raw request body.
    pub fn from_body(body: &str, default_callback: Option<&str>) -> Result<Self, RequestError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| RequestError::MalformedBody(e.to_string()))?;
        Self::from_value(&value, default_callback)
    }

    pub fn from_value(value: &Value, default_callback: Option<&str>) -> Result<Self, RequestError> {
        let fields = value.as_object().ok_or(RequestError::NotAnObject)?;

        let correlation = Correlation::from_fields(fields, default_callback);
        let application_id = correlation
            .application_id
            .ok_or(RequestError::MissingApplicationId)?;
        let callback_target = correlation
            .callback_target
            .ok_or(RequestError::MissingCallbackTarget)?;

        let job = JobRequirement {
            title: text_field(fields, "jobTitle"),
            description: text_field(fields, "jobDescription"),
            location: text_field(fields, "jobLocation"),
            category: text_field(fields, "jobCategory"),
            level: text_field(fields, "jobLevel"),
            salary: text_field(fields, "jobSalary"),
            required_skills: list_field(fields, "requiredSkills"),
        };

        let resume_url = text_field(fields, "resumeUrl");
        let candidate = CandidateProfile {
            skills: list_field(fields, "userSkills"),
            bio: text_field(fields, "userBio"),
            role: text_field(fields, "userRole"),
            resume_reference: (!resume_url.is_empty()).then_some(resume_url),
        };

        Ok(ScoringRequest {
            job,
            candidate,
            application_id,
            callback_target,
        })
    }
}

impl Correlation {
    pub fn from_body(body: &str, default_callback: Option<&str>) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(fields)) => Self::from_fields(&fields, default_callback),
            _ => Self::default(),
        }
    }

    fn from_fields(fields: &Map<String, Value>, default_callback: Option<&str>) -> Self {
        let application_id = non_empty(text_field(fields, "applicationId"));
        let callback_target = non_empty(text_field(fields, "backendUrl"))
            .or_else(|| default_callback.and_then(|d| non_empty(d.to_string())));
        Self {
            application_id,
            callback_target,
        }
    }
}

/// Strings are trimmed; numbers and booleans are rendered; anything else is empty.
fn text_field(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Arrays keep their non-empty string items; a comma-separated string is split.
fn list_field(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    match fields.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => vec![],
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}
