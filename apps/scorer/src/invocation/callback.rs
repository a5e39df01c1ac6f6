//! Callback delivery — a single best-effort POST of the result to the
//! requesting backend. There is no retry; callers only log failures.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::models::report::CallbackPayload;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Callback endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Sends one payload to one callback address.
#[async_trait]
pub trait CallbackSink: Send + Sync {
    async fn deliver(&self, url: &str, payload: &CallbackPayload) -> Result<(), DeliveryError>;
}

#[derive(Clone)]
pub struct HttpCallbackSink {
    client: Client,
}

impl HttpCallbackSink {
    pub fn new(timeout: Duration) -> Result<Self, DeliveryError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
        })
    }
}

#[async_trait]
impl CallbackSink for HttpCallbackSink {
    async fn deliver(&self, url: &str, payload: &CallbackPayload) -> Result<(), DeliveryError> {
        let response = self.client.post(url).json(payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Status {
                status: status.as_u16(),
                body,
            });
        }
        debug!(
            "Callback delivered to {url} for application {}",
            payload.application_id()
        );
        Ok(())
    }
}

/// Joins the callback base address and the endpoint path without doubling slashes.
pub fn callback_url(base: &str, path: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    let path = path.trim();
    if path.is_empty() {
        return base.to_string();
    }
    format!("{base}/{}", path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_url_joins_cleanly() {
        assert_eq!(
            callback_url("http://localhost:3001/", "/api/users/update-application-score"),
            "http://localhost:3001/api/users/update-application-score"
        );
        assert_eq!(
            callback_url("http://cb", "hook"),
            "http://cb/hook"
        );
        assert_eq!(callback_url("http://cb/", ""), "http://cb");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error_not_a_panic() {
        let sink = HttpCallbackSink::new(Duration::from_millis(500)).unwrap();
        let payload = CallbackPayload::Failure(crate::models::report::ErrorPayload {
            application_id: "a".to_string(),
            error: true,
            error_details: crate::models::report::ErrorDetails {
                error_type: "ScoringFailed".to_string(),
                error_message: "x".to_string(),
                timestamp: "2024-01-01T00:00:00.000Z".to_string(),
            },
        });
        let result = sink.deliver("http://127.0.0.1:9/callback", &payload).await;
        assert!(matches!(result, Err(DeliveryError::Http(_))));
    }
}
