use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_CALLBACK_PATH: &str = "/api/users/update-application-score";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub aws_region: String,
    pub s3_bucket: String,
    /// Custom endpoint (MinIO). Unset means the regional AWS endpoint.
    pub s3_endpoint: Option<String>,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub default_callback_url: Option<String>,
    pub callback_path: String,
    pub extraction_timeout_secs: u64,
    pub callback_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            aws_region: optional_env("AWS_REGION").unwrap_or_else(|| "ap-south-1".to_string()),
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: optional_env("S3_ENDPOINT"),
            aws_access_key_id: optional_env("AWS_ACCESS_KEY_ID"),
            aws_secret_access_key: optional_env("AWS_SECRET_ACCESS_KEY"),
            default_callback_url: optional_env("DEFAULT_CALLBACK_URL"),
            callback_path: optional_env("CALLBACK_PATH")
                .unwrap_or_else(|| DEFAULT_CALLBACK_PATH.to_string()),
            extraction_timeout_secs: parse_env("EXTRACTION_TIMEOUT_SECS", 20)
                .context("EXTRACTION_TIMEOUT_SECS must be a whole number of seconds")?,
            callback_timeout_secs: parse_env("CALLBACK_TIMEOUT_SECS", 15)
                .context("CALLBACK_TIMEOUT_SECS must be a whole number of seconds")?,
        })
    }

    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    pub fn callback_timeout(&self) -> Duration {
        Duration::from_secs(self.callback_timeout_secs)
    }

    /// Static credentials only when both halves are present.
    pub fn static_credentials(&self) -> Option<(&str, &str)> {
        match (&self.aws_access_key_id, &self.aws_secret_access_key) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for {key}")),
        None => Ok(default),
    }
}
