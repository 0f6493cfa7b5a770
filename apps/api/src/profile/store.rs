//! Profile Store — owns the one `UserProfile` and every mutation of it.
//!
//! All mutations are serialized behind a single async mutex. A mutation
//! builds the next profile value, mirrors it to durable storage, and only
//! then swaps it in; if persistence fails the in-memory record is untouched.
//! Because the save is awaited while the lock is held, persistence always
//! completes before the next mutation is accepted.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::profile::models::{CareerPath, Identity, ResumeAnalysis, UserProfile};
use crate::profile::storage::SnapshotStore;

pub struct ProfileStore {
    profile: Mutex<UserProfile>,
    storage: Arc<dyn SnapshotStore>,
}

impl ProfileStore {
    /// Restores the last persisted session, or starts empty.
    pub async fn restore(storage: Arc<dyn SnapshotStore>) -> Self {
        let profile = match storage.load().await {
            Ok(Some(profile)) => {
                info!("Restored prior session");
                profile
            }
            Ok(None) => UserProfile::default(),
            Err(e) => {
                debug!("Session restore failed, starting empty: {e:?}");
                UserProfile::default()
            }
        };

        Self {
            profile: Mutex::new(profile),
            storage,
        }
    }

    /// Read-only copy of the current profile.
    pub async fn snapshot(&self) -> UserProfile {
        self.profile.lock().await.clone()
    }

    pub async fn ensure_logged_in(&self) -> Result<(), AppError> {
        if self.profile.lock().await.is_logged_in() {
            Ok(())
        } else {
            Err(AppError::Precondition("Log in first".to_string()))
        }
    }

    /// Starts a fresh session for `email`: the profile is recreated empty
    /// with only the new identity set.
    pub async fn login(&self, email: &str) -> Result<Identity, AppError> {
        let identity = Identity::from_email(email);
        let mut guard = self.profile.lock().await;

        let next = UserProfile {
            identity: Some(identity.clone()),
            updated_at: Some(Utc::now()),
            ..Default::default()
        };
        self.persist(&next).await?;
        *guard = next;

        info!("Session started for {}", identity.email);
        Ok(identity)
    }

    /// Clears the profile and the durable snapshot (logout).
    pub async fn reset(&self) -> Result<(), AppError> {
        let mut guard = self.profile.lock().await;
        self.storage.clear().await.map_err(AppError::Storage)?;
        *guard = UserProfile::default();
        info!("Session cleared");
        Ok(())
    }

    /// Atomically replaces the résumé analysis.
    ///
    /// A new résumé invalidates all derived career data: `career_path` and
    /// `interview_score` are cleared. `selected_role` is retained — the
    /// career path for it must be regenerated before reuse.
    pub async fn replace_analysis(&self, analysis: ResumeAnalysis) -> Result<(), AppError> {
        let mut guard = self.profile.lock().await;

        let mut next = guard.clone();
        next.resume_analysis = Some(analysis);
        next.career_path = None;
        next.interview_score = None;
        next.updated_at = Some(Utc::now());

        self.persist(&next).await?;
        *guard = next;
        info!("Resume analysis stored; derived career data invalidated");
        Ok(())
    }

    /// First, synchronous half of a role selection: records the new role and
    /// clears stale derived state before any generation work starts, so no
    /// observer can see a `career_path` disagreeing with `selected_role`.
    ///
    /// `issue_token` runs under the profile lock; the token it returns
    /// fences the asynchronous half (see `commit_career_path_if`).
    ///
    /// Returns the analysis the generation pipeline is keyed on.
    pub async fn begin_role_selection(
        &self,
        role: &str,
        issue_token: impl FnOnce() -> u64,
    ) -> Result<(ResumeAnalysis, u64), AppError> {
        let mut guard = self.profile.lock().await;

        let Some(analysis) = guard.resume_analysis.clone() else {
            return Err(AppError::Precondition(
                "Analyze a resume before selecting a role".to_string(),
            ));
        };

        let mut next = guard.clone();
        next.selected_role = Some(role.to_string());
        next.career_path = None;
        next.interview_score = None;
        next.updated_at = Some(Utc::now());

        self.persist(&next).await?;
        *guard = next;

        let token = issue_token();
        debug!("Role selection begun: {role} (token {token})");
        Ok((analysis, token))
    }

    /// Merges a fully generated career path, all-or-nothing.
    ///
    /// `still_current` is evaluated under the profile lock; when it reports
    /// false the result belongs to a superseded selection and is discarded
    /// without mutating anything. Returns whether the merge happened.
    pub async fn commit_career_path_if(
        &self,
        path: CareerPath,
        still_current: impl FnOnce() -> bool,
    ) -> Result<bool, AppError> {
        let mut guard = self.profile.lock().await;

        if !still_current() {
            debug!("Discarding superseded career path for {}", path.role);
            return Ok(false);
        }

        // Invariant: a stored career path always matches the selected role.
        if guard.selected_role.as_deref() != Some(path.role.as_str()) {
            debug!(
                "Discarding career path for {} (selected role is {:?})",
                path.role, guard.selected_role
            );
            return Ok(false);
        }

        let mut next = guard.clone();
        next.career_path = Some(path);
        next.updated_at = Some(Utc::now());

        self.persist(&next).await?;
        *guard = next;
        Ok(true)
    }

    /// Records a completed mock-interview score.
    /// Requires a career path with a non-empty question set.
    pub async fn record_interview_score(&self, score: f64) -> Result<(), AppError> {
        let mut guard = self.profile.lock().await;

        let has_questions = guard
            .career_path
            .as_ref()
            .is_some_and(|p| !p.interview_questions.is_empty());
        if !has_questions {
            return Err(AppError::Precondition(
                "No interview questions to score against".to_string(),
            ));
        }

        let mut next = guard.clone();
        next.interview_score = Some(score);
        next.updated_at = Some(Utc::now());

        self.persist(&next).await?;
        *guard = next;
        info!("Interview score recorded: {score:.1}/10");
        Ok(())
    }

    async fn persist(&self, profile: &UserProfile) -> Result<(), AppError> {
        self.storage.save(profile).await.map_err(AppError::Storage)
    }
}
