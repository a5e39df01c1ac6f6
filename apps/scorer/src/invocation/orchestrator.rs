//! Invocation orchestrator — drives one scoring request through
//! `received → (extracting) → scoring → reporting → done`, or
//! `failed → reporting_error → done` when scoring breaks.
//!
//! Delivery is at-most-once: a failed callback is logged and dropped. The
//! returned [`InvocationOutcome`] describes the invocation itself and does not
//! depend on whether the callback arrived.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::invocation::callback::{callback_url, CallbackSink};
use crate::invocation::extraction::{
    is_pdf_like, DocumentReference, DocumentTextExtractor, ExtractionError,
};
use crate::matching::aggregate::Scorer;
use crate::models::report::{
    CallbackPayload, ErrorKind, ErrorReport, ProcessingInfo, ScorePayload, TextSource,
};
use crate::models::request::{Correlation, ScoringRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Extracting,
    Scoring,
    Reporting,
    Failed,
    ReportingError,
    Done,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Received => "received",
            Stage::Extracting => "extracting",
            Stage::Scoring => "scoring",
            Stage::Reporting => "reporting",
            Stage::Failed => "failed",
            Stage::ReportingError => "reporting_error",
            Stage::Done => "done",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    /// A score was computed and a delivery attempted.
    Scored,
    /// Scoring broke; an error report was attempted instead.
    Failed,
    /// No correlation id or callback target; nothing was delivered.
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationOutcome {
    pub status: OutcomeStatus,
    pub success: bool,
    pub application_id: Option<String>,
    pub score: Option<u32>,
    pub extraction_used: bool,
    pub callback_delivered: bool,
    pub message: String,
}

impl InvocationOutcome {
    fn rejected(application_id: Option<String>, message: String) -> Self {
        Self {
            status: OutcomeStatus::Rejected,
            success: false,
            application_id,
            score: None,
            extraction_used: false,
            callback_delivered: false,
            message,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    /// Used when a request carries no `backendUrl`.
    pub default_callback_url: Option<String>,
    pub callback_path: String,
    /// Bucket for bare-key resume references.
    pub default_bucket: String,
    pub extraction_timeout: Duration,
}

pub struct Orchestrator {
    extractor: Arc<dyn DocumentTextExtractor>,
    sink: Arc<dyn CallbackSink>,
    scorer: Arc<dyn Scorer>,
    settings: OrchestratorSettings,
}

impl Orchestrator {
    pub fn new(
        extractor: Arc<dyn DocumentTextExtractor>,
        sink: Arc<dyn CallbackSink>,
        scorer: Arc<dyn Scorer>,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            extractor,
            sink,
            scorer,
            settings,
        }
    }

    pub fn settings(&self) -> &OrchestratorSettings {
        &self.settings
    }

    /// Fire-and-forget: runs the invocation on the runtime and returns immediately.
    pub fn spawn(self: &Arc<Self>, body: String) -> JoinHandle<InvocationOutcome> {
        let orchestrator = Arc::clone(self);
        tokio::spawn(async move { orchestrator.run(&body).await })
    }

    /// Runs one invocation from a raw request body to completion.
    pub async fn run(&self, body: &str) -> InvocationOutcome {
        let invocation_id = Uuid::new_v4();
        let default_callback = self.settings.default_callback_url.as_deref();

        let request = match ScoringRequest::from_body(body, default_callback) {
            Ok(request) => request,
            Err(e) => {
                let correlation = Correlation::from_body(body, default_callback);
                warn!(
                    %invocation_id,
                    application_id = correlation.application_id.as_deref().unwrap_or("unknown"),
                    "Rejected scoring request, no callback attempted: {e}"
                );
                return InvocationOutcome::rejected(correlation.application_id, e.to_string());
            }
        };

        self.run_request(invocation_id, request).await
    }

    async fn run_request(&self, invocation_id: Uuid, request: ScoringRequest) -> InvocationOutcome {
        let application_id = request.application_id.clone();
        let log_stage = |stage: Stage| {
            info!(%invocation_id, %application_id, stage = stage.as_str(), "Invocation stage");
        };
        log_stage(Stage::Received);

        let (candidate_text, extraction_used) = self
            .candidate_text(&request, || log_stage(Stage::Extracting))
            .await;

        log_stage(Stage::Scoring);
        let scorer = Arc::clone(&self.scorer);
        let job = request.job.clone();
        let candidate = request.candidate.clone();
        let text = candidate_text.clone();
        let scored = tokio::task::spawn_blocking(move || {
            scorer.score(&job, &candidate, &text, extraction_used)
        })
        .await;

        let url = callback_url(&request.callback_target, &self.settings.callback_path);

        let report = match scored {
            Ok(Ok(result)) => {
                log_stage(Stage::Reporting);
                let score = result.final_score;
                let processing_info = ProcessingInfo {
                    resume_provided: request.candidate.resume_reference.is_some(),
                    extraction_used,
                    text_source: if extraction_used {
                        TextSource::Extracted
                    } else {
                        TextSource::Bio
                    },
                    candidate_text_length: candidate_text.chars().count(),
                    total_required_skills: request.job.required_skills.len(),
                    total_user_skills: request.candidate.skills.len(),
                    processed_at: Utc::now(),
                };
                let payload = CallbackPayload::Success(Box::new(ScorePayload::new(
                    &application_id,
                    result,
                    processing_info,
                )));
                let callback_delivered = self.deliver(&url, &payload).await;
                log_stage(Stage::Done);
                info!(%invocation_id, %application_id, "Scored application: {score}/100");
                return InvocationOutcome {
                    status: OutcomeStatus::Scored,
                    success: true,
                    application_id: Some(application_id.clone()),
                    score: Some(score),
                    extraction_used,
                    callback_delivered,
                    message: "Resume scored successfully".to_string(),
                };
            }
            Ok(Err(e)) => ErrorReport::new(&application_id, ErrorKind::ScoringFailed, e.to_string()),
            Err(e) => ErrorReport::new(
                &application_id,
                ErrorKind::ScoringPanicked,
                format!("Scoring task did not complete: {e}"),
            ),
        };

        log_stage(Stage::Failed);
        error!(%invocation_id, %application_id, "Scoring failed: {}", report.message);
        log_stage(Stage::ReportingError);
        let callback_delivered = self
            .deliver(&url, &CallbackPayload::Failure((&report).into()))
            .await;
        log_stage(Stage::Done);

        InvocationOutcome {
            status: OutcomeStatus::Failed,
            success: false,
            application_id: Some(application_id.clone()),
            score: None,
            extraction_used,
            callback_delivered,
            message: report.message,
        }
    }

    /// Extracted resume text when a PDF-like reference yields text, otherwise the bio.
    async fn candidate_text(
        &self,
        request: &ScoringRequest,
        on_extracting: impl FnOnce(),
    ) -> (String, bool) {
        let bio = request.candidate.bio.clone();
        let Some(reference) = request.candidate.resume_reference.as_deref() else {
            return (bio, false);
        };
        if !is_pdf_like(reference) {
            debug!("Resume reference '{reference}' is not PDF-like, using bio");
            return (bio, false);
        }

        on_extracting();
        match self.extract(reference).await {
            Ok(lines) if !lines.is_empty() => (lines.join("\n"), true),
            Ok(_) => {
                warn!(
                    application_id = %request.application_id,
                    "Extraction returned no text for '{reference}', falling back to bio"
                );
                (bio, false)
            }
            Err(e) => {
                warn!(
                    application_id = %request.application_id,
                    "Extraction failed for '{reference}', falling back to bio: {e}"
                );
                (bio, false)
            }
        }
    }

    async fn extract(&self, reference: &str) -> Result<Vec<String>, ExtractionError> {
        let reference = DocumentReference::parse(reference, &self.settings.default_bucket)?;
        let timeout = self.settings.extraction_timeout;
        tokio::time::timeout(timeout, self.extractor.extract_lines(&reference))
            .await
            .map_err(|_| ExtractionError::Timeout(timeout.as_secs()))?
    }

    /// One delivery attempt. Failures end here with a log line.
    async fn deliver(&self, url: &str, payload: &CallbackPayload) -> bool {
        match self.sink.deliver(url, payload).await {
            Ok(()) => true,
            Err(e) => {
                error!(
                    application_id = payload.application_id(),
                    is_error_report = payload.is_error(),
                    "Callback delivery to {url} failed, result dropped: {e}"
                );
                false
            }
        }
    }
}
