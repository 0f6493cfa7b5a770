//! Axum route handlers for session and profile access.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::profile::models::{Identity, UserProfile};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: UserProfile,
    /// Whether a role-selection pipeline is currently in flight.
    pub generating: bool,
}

/// POST /api/v1/session/login
///
/// Starts a fresh session: the profile is recreated empty with the new
/// identity. A previous session's snapshot is restored at startup, not here.
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Identity>, AppError> {
    let email = request.email.trim();
    let (local, domain) = email.split_once('@').unwrap_or(("", ""));
    if local.is_empty() || domain.is_empty() {
        return Err(AppError::Validation(
            "A valid email address is required".to_string(),
        ));
    }

    let identity = state.profile.login(email).await?;
    state.interview.lock().await.take();
    Ok(Json(identity))
}

/// POST /api/v1/session/logout
///
/// Clears the profile, the durable snapshot, and any interview attempt.
pub async fn handle_logout(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    state.profile.reset().await?;
    state.interview.lock().await.take();
    Ok(Json(serde_json::json!({ "status": "logged_out" })))
}

/// GET /api/v1/profile
///
/// The full progress record plus the in-flight generation flag — the
/// dashboard's single data source.
pub async fn handle_get_profile(
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, AppError> {
    state.profile.ensure_logged_in().await?;
    Ok(Json(ProfileResponse {
        profile: state.profile.snapshot().await,
        generating: state.orchestrator.is_generating(),
    }))
}
