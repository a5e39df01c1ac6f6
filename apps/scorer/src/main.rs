mod config;
mod errors;
mod invocation;
mod matching;
mod models;
mod routes;
mod state;

use anyhow::{Context, Result};
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::invocation::callback::HttpCallbackSink;
use crate::invocation::extraction::ObjectStoreExtractor;
use crate::invocation::orchestrator::{Orchestrator, OrchestratorSettings};
use crate::matching::aggregate::WeightedScorer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume scorer v{}", env!("CARGO_PKG_VERSION"));

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!(
        "S3 client initialized (region: {}, default bucket: {})",
        config.aws_region, config.s3_bucket
    );

    // Document extraction: S3 objects or plain URLs, decoded with pdf-extract
    let http = reqwest::Client::builder()
        .timeout(config.extraction_timeout())
        .build()
        .context("Failed to build document fetch client")?;
    let extractor = Arc::new(ObjectStoreExtractor::new(s3, http));

    // Callback delivery: one POST per invocation, no retry
    let sink = Arc::new(
        HttpCallbackSink::new(config.callback_timeout())
            .context("Failed to build callback client")?,
    );

    let orchestrator = Orchestrator::new(
        extractor,
        sink,
        Arc::new(WeightedScorer),
        OrchestratorSettings {
            default_callback_url: config.default_callback_url.clone(),
            callback_path: config.callback_path.clone(),
            default_bucket: config.s3_bucket.clone(),
            extraction_timeout: config.extraction_timeout(),
        },
    );
    match &config.default_callback_url {
        Some(url) => info!("Default callback target: {url}{}", config.callback_path),
        None => info!("No default callback target; requests must carry backendUrl"),
    }

    // Build app state
    let state = AppState {
        orchestrator: Arc::new(orchestrator),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client for AWS, or for MinIO when a custom endpoint is set.
/// Without static credentials the default provider chain is used.
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.aws_region.clone()));

    if let Some((access_key_id, secret_access_key)) = config.static_credentials() {
        let credentials = Credentials::new(
            access_key_id,
            secret_access_key,
            None,
            None,
            "resume-scorer-static",
        );
        loader = loader.credentials_provider(credentials);
    }
    if let Some(endpoint) = &config.s3_endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(config.s3_endpoint.is_some())
        .build();

    aws_sdk_s3::Client::from_conf(s3_config)
}
