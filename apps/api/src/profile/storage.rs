//! Durable session storage — one named record holding a JSON snapshot of
//! `UserProfile`.
//!
//! Contract: `load()` returns the last snapshot or `None`, `save()`
//! overwrites it, `clear()` removes it. There is no schema versioning; a
//! missing or unreadable snapshot is treated as "no prior session".
//!
//! Two backends: a JSON file (default) and Redis, selected at startup via
//! `SESSION_STORE`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::AsyncCommands;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::profile::models::UserProfile;

#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn load(&self) -> Result<Option<UserProfile>>;
    async fn save(&self, profile: &UserProfile) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

// ────────────────────────────────────────────────────────────────────────────
// File backend
// ────────────────────────────────────────────────────────────────────────────

pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn load(&self) -> Result<Option<UserProfile>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("reading snapshot {:?}", self.path))
            }
        };

        match serde_json::from_slice::<UserProfile>(&bytes) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                // Unreadable snapshot counts as no prior session rather than
                // blocking startup.
                warn!("Discarding unreadable session snapshot {:?}: {e}", self.path);
                Ok(None)
            }
        }
    }

    async fn save(&self, profile: &UserProfile) -> Result<()> {
        let json = serde_json::to_vec_pretty(profile).context("serializing session snapshot")?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("writing snapshot {:?}", self.path))?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing snapshot {:?}", self.path)),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Redis backend
// ────────────────────────────────────────────────────────────────────────────

const SESSION_KEY: &str = "pathway:session";

pub struct RedisSnapshotStore {
    conn: redis::aio::MultiplexedConnection,
}

impl RedisSnapshotStore {
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url).context("parsing REDIS_URL")?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .context("connecting to Redis")?;
        info!("Redis session store connected");
        Ok(Self { conn })
    }
}

#[async_trait]
impl SnapshotStore for RedisSnapshotStore {
    async fn load(&self) -> Result<Option<UserProfile>> {
        let mut conn = self.conn.clone();
        let json: Option<String> = conn.get(SESSION_KEY).await.context("GET session snapshot")?;
        let Some(json) = json else { return Ok(None) };

        match serde_json::from_str::<UserProfile>(&json) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                warn!("Discarding unreadable session snapshot from Redis: {e}");
                Ok(None)
            }
        }
    }

    async fn save(&self, profile: &UserProfile) -> Result<()> {
        let json = serde_json::to_string(profile).context("serializing session snapshot")?;
        let mut conn = self.conn.clone();
        let _: () = conn
            .set(SESSION_KEY, json)
            .await
            .context("SET session snapshot")?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .del(SESSION_KEY)
            .await
            .context("DEL session snapshot")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::models::Identity;

    fn store_in(dir: &tempfile::TempDir) -> FileSnapshotStore {
        FileSnapshotStore::new(dir.path().join("session.json"))
    }

    #[tokio::test]
    async fn test_load_missing_file_is_no_prior_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let profile = UserProfile {
            identity: Some(Identity::from_email("dev@example.com")),
            ..Default::default()
        };
        store.save(&profile).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, profile);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_tolerated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();

        let store = FileSnapshotStore::new(path);
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_removes_snapshot_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&UserProfile::default()).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        store.clear().await.unwrap();
    }
}
