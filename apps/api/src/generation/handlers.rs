//! Axum route handlers for résumé ingestion and role selection.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog;
use crate::errors::AppError;
use crate::extraction::{extract_pdf_text, PDF_CONTENT_TYPE};
use crate::generation::requests::ContentGenerator;
use crate::profile::models::{CareerPath, ResumeAnalysis};
use crate::profile::store::ProfileStore;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RoleEntry {
    pub role: &'static str,
    pub required_skills: &'static [&'static str],
}

#[derive(Debug, Deserialize)]
pub struct SelectRoleRequest {
    pub role: String,
}

/// GET /api/v1/roles
///
/// The fixed role catalog with each role's requirement profile.
pub async fn handle_list_roles() -> Json<Vec<RoleEntry>> {
    Json(
        catalog::JOB_ROLES
            .iter()
            .map(|role| RoleEntry {
                role,
                required_skills: catalog::required_skills(role),
            })
            .collect(),
    )
}

/// POST /api/v1/resume (multipart)
///
/// Upload → PDF text extraction → résumé analysis → atomic profile update.
/// Any failure leaves the profile exactly as it was.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeAnalysis>, AppError> {
    state.profile.ensure_logged_in().await?;

    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
        .ok_or_else(|| AppError::Validation("Upload a resume file".to_string()))?;

    if field.content_type() != Some(PDF_CONTENT_TYPE) {
        return Err(AppError::Extraction(
            "Please upload a PDF file".to_string(),
        ));
    }

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Upload interrupted: {e}")))?;

    let text = extract_pdf_text(&data)?;
    info!("Extracted {} chars of resume text", text.len());

    let analysis = ingest_resume_text(state.generator.as_ref(), &state.profile, &text).await?;
    Ok(Json(analysis))
}

/// Analyze extracted résumé text and store the result atomically.
/// A failed analysis never touches the profile.
pub(crate) async fn ingest_resume_text(
    generator: &dyn ContentGenerator,
    profile: &ProfileStore,
    text: &str,
) -> Result<ResumeAnalysis, AppError> {
    let analysis = generator.analyze_resume(text).await?;
    profile.replace_analysis(analysis.clone()).await?;
    Ok(analysis)
}

/// POST /api/v1/roles/select
///
/// Runs the full generation pipeline for the chosen role and returns the
/// merged career path. A newer selection supersedes one still in flight.
pub async fn handle_select_role(
    State(state): State<AppState>,
    Json(request): Json<SelectRoleRequest>,
) -> Result<Json<CareerPath>, AppError> {
    state.profile.ensure_logged_in().await?;

    // A new career path invalidates any interview attempt against the old
    // question set.
    state.interview.lock().await.take();

    let path = state.orchestrator.select_role(&request.role).await?;
    Ok(Json(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::requests::{CareerAdvice, InterviewResult, QaPair};
    use crate::profile::models::{InterviewQuestion, UserProfile};
    use crate::profile::storage::FileSnapshotStore;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct BrokenAnalyzer;

    #[async_trait]
    impl ContentGenerator for BrokenAnalyzer {
        async fn analyze_resume(&self, _resume_text: &str) -> Result<ResumeAnalysis, AppError> {
            Err(AppError::Generation("analysis backend down".to_string()))
        }
        async fn career_advice(
            &self,
            _analysis: &ResumeAnalysis,
            _target_role: &str,
        ) -> Result<CareerAdvice, AppError> {
            unreachable!("not exercised")
        }
        async fn interview_questions(
            &self,
            _analysis: &ResumeAnalysis,
            _target_role: &str,
            _count: usize,
        ) -> Result<Vec<InterviewQuestion>, AppError> {
            unreachable!("not exercised")
        }
        async fn evaluate_answers(
            &self,
            _transcript: &[QaPair],
        ) -> Result<InterviewResult, AppError> {
            unreachable!("not exercised")
        }
    }

    #[tokio::test]
    async fn test_failed_analysis_leaves_profile_exactly_as_before() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(FileSnapshotStore::new(dir.path().join("session.json")));
        let profile = ProfileStore::restore(storage).await;
        profile.login("dev@example.com").await.unwrap();
        profile
            .replace_analysis(ResumeAnalysis {
                skills: vec!["React".to_string()],
                strengths: vec![],
                weaknesses: vec![],
                missing_skills: vec![],
                source_text: "old resume".to_string(),
            })
            .await
            .unwrap();

        let before: UserProfile = profile.snapshot().await;

        let err = ingest_resume_text(&BrokenAnalyzer, &profile, "new resume")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));

        // The prior analysis, role, and career path are all untouched.
        assert_eq!(profile.snapshot().await, before);
    }
}
