use std::sync::Arc;

use crate::invocation::orchestrator::Orchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Owns the extractor, callback sink and scorer. Each request is one invocation.
    pub orchestrator: Arc<Orchestrator>,
}
