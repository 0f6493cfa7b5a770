use anyhow::{bail, Context, Result};
use std::path::PathBuf;

/// Which backend holds the durable session snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStoreKind {
    File,
    Redis,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub session_store: SessionStoreKind,
    /// Snapshot file path, used when `session_store` is `File`.
    pub session_file: PathBuf,
    /// Required only when `session_store` is `Redis`.
    pub redis_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let session_store = match std::env::var("SESSION_STORE")
            .unwrap_or_else(|_| "file".to_string())
            .to_lowercase()
            .as_str()
        {
            "file" => SessionStoreKind::File,
            "redis" => SessionStoreKind::Redis,
            other => bail!("SESSION_STORE must be 'file' or 'redis', got '{other}'"),
        };

        let redis_url = std::env::var("REDIS_URL").ok();
        if session_store == SessionStoreKind::Redis && redis_url.is_none() {
            bail!("REDIS_URL is required when SESSION_STORE=redis");
        }

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            session_store,
            session_file: std::env::var("SESSION_FILE")
                .unwrap_or_else(|_| "pathway_session.json".to_string())
                .into(),
            redis_url,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
