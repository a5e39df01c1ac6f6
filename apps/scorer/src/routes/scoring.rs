//! Axum route handlers that trigger scoring invocations.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::info;

use crate::errors::AppError;
use crate::invocation::orchestrator::OutcomeStatus;
use crate::models::request::ScoringRequest;
use crate::state::AppState;

/// POST /api/v1/score
/// Runs the invocation to completion, callback included, and reports how it went.
/// A failed callback only shows up as `callbackDelivered: false`.
pub async fn handle_score(
    State(state): State<AppState>,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    // Spawned so a dropped client connection cannot cancel a half-finished invocation.
    let outcome = state
        .orchestrator
        .spawn(body)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invocation task failed: {e}")))?;

    let status = match outcome.status {
        OutcomeStatus::Scored => StatusCode::OK,
        OutcomeStatus::Failed => StatusCode::INTERNAL_SERVER_ERROR,
        OutcomeStatus::Rejected => return Err(AppError::Validation(outcome.message)),
    };
    Ok((status, Json(outcome)))
}

/// POST /api/v1/score/async
/// Validates correlation fields, then hands the invocation to the runtime.
/// The result is only observable through the callback and the logs.
pub async fn handle_score_async(
    State(state): State<AppState>,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    let default_callback = state.orchestrator.settings().default_callback_url.as_deref();
    let request = ScoringRequest::from_body(&body, default_callback)?;

    drop(state.orchestrator.spawn(body));
    info!(application_id = %request.application_id, "Accepted scoring request");

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({
            "accepted": true,
            "applicationId": request.application_id
        })),
    ))
}
