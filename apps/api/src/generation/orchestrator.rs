//! Pipeline Orchestrator — drives a role selection from invalidation through
//! generation to the atomic merge.
//!
//! Flow: begin_role_selection (sync invalidation + token issue) →
//!       fan out advice + question generation → readiness score →
//!       commit_career_path_if (merge only when the token is still current).
//!
//! Every selection takes the next value of a monotonically increasing
//! generation token; a later selection supersedes an in-flight one and the
//! stale result is discarded at commit time. Token issue and the currency
//! check both run under the profile lock, so there is no window where a
//! superseded result can merge.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use crate::catalog;
use crate::errors::AppError;
use crate::generation::readiness::readiness_score;
use crate::generation::requests::ContentGenerator;
use crate::profile::models::CareerPath;
use crate::profile::store::ProfileStore;

/// Question count for the reference role-preparation step.
pub const INTERVIEW_QUESTION_COUNT: usize = 5;

pub struct Orchestrator {
    store: Arc<ProfileStore>,
    generator: Arc<dyn ContentGenerator>,
    /// Generation token of the most recent selection.
    token: AtomicU64,
    /// Process-wide flag: a selection pipeline is in flight.
    generating: AtomicBool,
}

impl Orchestrator {
    pub fn new(store: Arc<ProfileStore>, generator: Arc<dyn ContentGenerator>) -> Self {
        Self {
            store,
            generator,
            token: AtomicU64::new(0),
            generating: AtomicBool::new(false),
        }
    }

    pub fn is_generating(&self) -> bool {
        self.generating.load(Ordering::SeqCst)
    }

    /// Runs the full role-selection pipeline and returns the merged career
    /// path. On any failure the profile keeps `selected_role` but no
    /// `career_path`; re-invoking with the same role retries.
    pub async fn select_role(&self, role: &str) -> Result<CareerPath, AppError> {
        if !catalog::is_known_role(role) {
            return Err(AppError::Validation(format!(
                "'{role}' is not a known role"
            )));
        }

        // Synchronous half: invalidate stale derived state and take a token,
        // both under the profile lock.
        let (analysis, my_token) = self
            .store
            .begin_role_selection(role, || self.token.fetch_add(1, Ordering::SeqCst) + 1)
            .await?;
        self.generating.store(true, Ordering::SeqCst);
        info!("Generating career path for {role} (token {my_token})");

        // The two generation requests are independent; run them concurrently.
        let outcome = tokio::try_join!(
            self.generator.career_advice(&analysis, role),
            self.generator
                .interview_questions(&analysis, role, INTERVIEW_QUESTION_COUNT),
        );

        let result = match outcome {
            Ok((advice, questions)) => {
                // Readiness is computed locally, never delegated.
                let score = readiness_score(&analysis.skills, catalog::required_skills(role));
                let path = CareerPath {
                    role: role.to_string(),
                    readiness_score: score,
                    recommendation: advice.recommendation,
                    roadmap: advice.roadmap,
                    interview_questions: questions,
                };

                let merged = self
                    .store
                    .commit_career_path_if(path.clone(), || {
                        self.token.load(Ordering::SeqCst) == my_token
                    })
                    .await?;

                if merged {
                    info!("Career path ready for {role}: readiness {score}/100");
                    Ok(path)
                } else {
                    Err(AppError::Precondition(
                        "Superseded by a newer role selection".to_string(),
                    ))
                }
            }
            Err(e) => {
                // All-or-nothing: one failed call means no career path at all.
                warn!("Career path generation failed for {role}: {e}");
                Err(e)
            }
        };

        // Exit Generating — but a superseded call must not clear the flag of
        // the selection that replaced it.
        if self.token.load(Ordering::SeqCst) == my_token {
            self.generating.store(false, Ordering::SeqCst);
        }

        result
    }
}
