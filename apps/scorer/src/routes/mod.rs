pub mod health;
pub mod scoring;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/score", post(scoring::handle_score))
        .route("/api/v1/score/async", post(scoring::handle_score_async))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tokio::sync::mpsc;
    use tower::ServiceExt;

    use crate::invocation::callback::{CallbackSink, DeliveryError};
    use crate::invocation::extraction::{DocumentReference, DocumentTextExtractor, ExtractionError};
    use crate::invocation::orchestrator::{Orchestrator, OrchestratorSettings};
    use crate::matching::aggregate::WeightedScorer;
    use crate::models::report::CallbackPayload;

    struct NoDocuments;

    #[async_trait]
    impl DocumentTextExtractor for NoDocuments {
        async fn extract_lines(
            &self,
            reference: &DocumentReference,
        ) -> Result<Vec<String>, ExtractionError> {
            Err(ExtractionError::Fetch(format!("{reference:?} not found")))
        }
    }

    struct ChannelSink {
        tx: mpsc::UnboundedSender<(String, CallbackPayload)>,
        fail: bool,
    }

    #[async_trait]
    impl CallbackSink for ChannelSink {
        async fn deliver(&self, url: &str, payload: &CallbackPayload) -> Result<(), DeliveryError> {
            let _ = self.tx.send((url.to_string(), payload.clone()));
            if self.fail {
                return Err(DeliveryError::Status {
                    status: 500,
                    body: String::new(),
                });
            }
            Ok(())
        }
    }

    fn router(fail_delivery: bool) -> (Router, mpsc::UnboundedReceiver<(String, CallbackPayload)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let orchestrator = Orchestrator::new(
            Arc::new(NoDocuments),
            Arc::new(ChannelSink {
                tx,
                fail: fail_delivery,
            }),
            Arc::new(WeightedScorer),
            OrchestratorSettings {
                default_callback_url: None,
                callback_path: "/api/users/update-application-score".to_string(),
                default_bucket: "resumes".to_string(),
                extraction_timeout: Duration::from_secs(5),
            },
        );
        let state = AppState {
            orchestrator: Arc::new(orchestrator),
        };
        (build_router(state), rx)
    }

    fn score_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn valid_body() -> Value {
        json!({
            "jobTitle": "Frontend Developer",
            "jobDescription": "Build React interfaces",
            "jobLevel": "mid",
            "requiredSkills": ["React", "TypeScript"],
            "userSkills": ["React"],
            "userBio": "Frontend developer with 3 years of experience in React",
            "userRole": "Frontend Developer",
            "resumeUrl": "s3://resumes/u1/cv.pdf",
            "applicationId": "app-7",
            "backendUrl": "http://backend.local"
        })
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (router, _rx) = router(false);
        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resume-scorer");
    }

    #[tokio::test]
    async fn test_sync_score_reports_outcome_and_delivers() {
        let (router, mut rx) = router(false);
        let response = router
            .oneshot(score_request("/api/v1/score", valid_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["applicationId"], "app-7");
        assert_eq!(body["extractionUsed"], false);
        assert_eq!(body["callbackDelivered"], true);
        assert!(body["score"].as_u64().unwrap() <= 100);

        let (url, payload) = rx.recv().await.unwrap();
        assert_eq!(url, "http://backend.local/api/users/update-application-score");
        assert_eq!(payload.application_id(), "app-7");
        assert!(!payload.is_error());
    }

    #[tokio::test]
    async fn test_sync_score_delivery_failure_keeps_status() {
        let (router, _rx) = router(true);
        let response = router
            .oneshot(score_request("/api/v1/score", valid_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["callbackDelivered"], false);
    }

    #[tokio::test]
    async fn test_sync_score_without_application_id_is_bad_request() {
        let (router, mut rx) = router(false);
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("applicationId");

        let response = router
            .oneshot(score_request("/api/v1/score", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_async_score_accepts_then_delivers() {
        let (router, mut rx) = router(false);
        let response = router
            .oneshot(score_request("/api/v1/score/async", valid_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let body = json_body(response).await;
        assert_eq!(body["accepted"], true);
        assert_eq!(body["applicationId"], "app-7");

        let (_, payload) = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(payload.application_id(), "app-7");
    }

    #[tokio::test]
    async fn test_async_score_without_callback_target_is_bad_request() {
        let (router, _rx) = router(false);
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("backendUrl");

        let response = router
            .oneshot(score_request("/api/v1/score/async", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
