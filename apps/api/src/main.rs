mod catalog;
mod config;
mod errors;
mod extraction;
mod generation;
mod interview;
mod llm_client;
mod profile;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, SessionStoreKind};
use crate::generation::orchestrator::Orchestrator;
use crate::generation::requests::{ContentGenerator, LlmContentGenerator};
use crate::llm_client::LlmClient;
use crate::profile::storage::{FileSnapshotStore, RedisSnapshotStore, SnapshotStore};
use crate::profile::store::ProfileStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("pathway_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pathway API v{}", env!("CARGO_PKG_VERSION"));

    // Durable session storage — file by default, Redis via SESSION_STORE
    let storage: Arc<dyn SnapshotStore> = match config.session_store {
        SessionStoreKind::File => {
            info!("Session store: file {:?}", config.session_file);
            Arc::new(FileSnapshotStore::new(config.session_file.clone()))
        }
        SessionStoreKind::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .expect("checked by Config::from_env");
            Arc::new(RedisSnapshotStore::connect(url).await?)
        }
    };

    // Profile store, restored from the last session if one exists
    let profile = Arc::new(ProfileStore::restore(storage).await);

    // LLM client and the content-generation collaborator built on it
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    let generator: Arc<dyn ContentGenerator> = Arc::new(LlmContentGenerator::new(llm));

    // Role-selection pipeline
    let orchestrator = Arc::new(Orchestrator::new(profile.clone(), generator.clone()));

    let state = AppState {
        profile,
        orchestrator,
        generator,
        interview: Arc::new(Mutex::new(None)),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
