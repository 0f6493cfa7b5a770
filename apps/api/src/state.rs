use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::generation::orchestrator::Orchestrator;
use crate::generation::requests::ContentGenerator;
use crate::interview::engine::InterviewEngine;
use crate::profile::store::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub profile: Arc<ProfileStore>,
    pub orchestrator: Arc<Orchestrator>,
    /// Content-generation collaborator. LLM-backed in production, stubbed in tests.
    pub generator: Arc<dyn ContentGenerator>,
    /// The one live mock-interview attempt, if any.
    pub interview: Arc<Mutex<Option<InterviewEngine>>>,
    pub config: Config,
}
