pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::interview::handlers as interview;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session
        .route("/api/v1/session/login", post(profile::handle_login))
        .route("/api/v1/session/logout", post(profile::handle_logout))
        .route("/api/v1/profile", get(profile::handle_get_profile))
        // Resume + role selection
        .route("/api/v1/resume", post(generation::handle_upload_resume))
        .route("/api/v1/roles", get(generation::handle_list_roles))
        .route("/api/v1/roles/select", post(generation::handle_select_role))
        // Mock interview
        .route("/api/v1/interview/start", post(interview::handle_start))
        .route("/api/v1/interview/answer", post(interview::handle_answer))
        .route("/api/v1/interview/restart", post(interview::handle_restart))
        .with_state(state)
}
