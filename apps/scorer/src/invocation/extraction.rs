//! Document text extraction — turns a stored resume into line-level text.
//!
//! `DocumentTextExtractor` is the seam; `ObjectStoreExtractor` is the
//! production backend (S3 or plain HTTP fetch, then `pdf-extract`).

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Url;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Invalid document reference: {0}")]
    InvalidReference(String),

    #[error("Object store error: {0}")]
    ObjectStore(String),

    #[error("Document fetch failed: {0}")]
    Fetch(String),

    #[error("PDF text extraction failed: {0}")]
    Decode(String),

    #[error("Extraction timed out after {0}s")]
    Timeout(u64),
}

/// Where a resume document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentReference {
    Object { bucket: String, key: String },
    Url(String),
}

impl DocumentReference {
    /// Accepts `s3://bucket/key`, virtual-hosted or path-style S3 URLs, any
    /// other http(s) URL, or a bare key resolved against `default_bucket`.
    pub fn parse(reference: &str, default_bucket: &str) -> Result<Self, ExtractionError> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(ExtractionError::InvalidReference("empty reference".to_string()));
        }

        if let Some(rest) = reference.strip_prefix("s3://") {
            return match rest.split_once('/') {
                Some((bucket, key)) if !bucket.is_empty() && !key.is_empty() => {
                    Ok(Self::object(bucket, key))
                }
                _ => Err(ExtractionError::InvalidReference(reference.to_string())),
            };
        }

        if reference.starts_with("http://") || reference.starts_with("https://") {
            let url = Url::parse(reference)
                .map_err(|e| ExtractionError::InvalidReference(format!("{reference}: {e}")))?;
            let host = url.host_str().unwrap_or_default();
            if !host.ends_with(".amazonaws.com") {
                return Ok(Self::Url(reference.to_string()));
            }
            let path = url.path().trim_start_matches('/');
            let (bucket, key) = if host.starts_with("s3.") || host.starts_with("s3-") {
                path.split_once('/').unwrap_or((path, ""))
            } else {
                (host.split('.').next().unwrap_or_default(), path)
            };
            if bucket.is_empty() || key.is_empty() {
                return Err(ExtractionError::InvalidReference(reference.to_string()));
            }
            return Ok(Self::object(bucket, key));
        }

        if default_bucket.is_empty() {
            return Err(ExtractionError::InvalidReference(format!(
                "bare key '{reference}' with no default bucket"
            )));
        }
        Ok(Self::object(default_bucket, reference.trim_start_matches('/')))
    }

    fn object(bucket: &str, key: &str) -> Self {
        Self::Object {
            bucket: bucket.to_string(),
            key: key.to_string(),
        }
    }
}

/// Only PDF-like references go through extraction.
pub fn is_pdf_like(reference: &str) -> bool {
    reference.to_lowercase().contains(".pdf")
}

/// Converts a stored document into ordered, non-empty text lines.
#[async_trait]
pub trait DocumentTextExtractor: Send + Sync {
    async fn extract_lines(
        &self,
        reference: &DocumentReference,
    ) -> Result<Vec<String>, ExtractionError>;
}

pub struct ObjectStoreExtractor {
    s3: aws_sdk_s3::Client,
    http: reqwest::Client,
}

impl ObjectStoreExtractor {
    pub fn new(s3: aws_sdk_s3::Client, http: reqwest::Client) -> Self {
        Self { s3, http }
    }

    async fn fetch(&self, reference: &DocumentReference) -> Result<Bytes, ExtractionError> {
        match reference {
            DocumentReference::Object { bucket, key } => {
                let object = self
                    .s3
                    .get_object()
                    .bucket(bucket)
                    .key(key)
                    .send()
                    .await
                    .map_err(|e| ExtractionError::ObjectStore(format!("s3://{bucket}/{key}: {e}")))?;
                let data = object
                    .body
                    .collect()
                    .await
                    .map_err(|e| ExtractionError::ObjectStore(e.to_string()))?;
                Ok(data.into_bytes())
            }
            DocumentReference::Url(url) => {
                let response = self
                    .http
                    .get(url)
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| ExtractionError::Fetch(e.to_string()))?;
                response
                    .bytes()
                    .await
                    .map_err(|e| ExtractionError::Fetch(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl DocumentTextExtractor for ObjectStoreExtractor {
    async fn extract_lines(
        &self,
        reference: &DocumentReference,
    ) -> Result<Vec<String>, ExtractionError> {
        let bytes = self.fetch(reference).await?;
        debug!("Fetched {} bytes for {:?}", bytes.len(), reference);

        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| ExtractionError::Decode(e.to_string()))?
            .map_err(|e| ExtractionError::Decode(e.to_string()))?;

        Ok(split_lines(&text))
    }
}

pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
