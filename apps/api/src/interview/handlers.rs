//! Axum route handlers driving the interview FSM.
//!
//! The engine itself is synchronous; these handlers own the one live attempt
//! (`AppState::interview`), release its lock across the evaluation call, and
//! feed the outcome back into the machine.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::generation::requests::InterviewResult;
use crate::interview::engine::{InterviewEngine, InterviewState, SubmitOutcome};
use crate::profile::models::InterviewQuestion;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub index: usize,
    pub total: usize,
    pub question: InterviewQuestion,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnswerResponse {
    InProgress { next: QuestionView },
    Completed { result: InterviewResult },
}

/// POST /api/v1/interview/start
///
/// Builds a fresh attempt from the current career path's question set and
/// returns the first question. Rejected while an attempt is mid-flight.
pub async fn handle_start(State(state): State<AppState>) -> Result<Json<QuestionView>, AppError> {
    state.profile.ensure_logged_in().await?;

    let mut session = state.interview.lock().await;
    if let Some(engine) = session.as_ref() {
        if matches!(
            engine.state(),
            InterviewState::InProgress { .. } | InterviewState::Evaluating { .. }
        ) {
            return Err(AppError::Precondition(
                "An interview is already in progress".to_string(),
            ));
        }
    }

    let questions = state
        .profile
        .snapshot()
        .await
        .career_path
        .map(|p| p.interview_questions)
        .unwrap_or_default();

    let mut engine = InterviewEngine::new(questions)?;
    let first = engine.start()?.clone();
    let total = engine.total_questions();
    *session = Some(engine);

    info!("Interview started: {total} questions");
    Ok(Json(QuestionView {
        index: 0,
        total,
        question: first,
    }))
}

/// POST /api/v1/interview/answer
///
/// Records one answer. The final answer triggers evaluation; on evaluation
/// failure the machine rolls back to the last question with every earlier
/// answer kept.
pub async fn handle_answer(
    State(state): State<AppState>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    state.profile.ensure_logged_in().await?;

    // Phase 1: advance the machine under the lock.
    let transcript = {
        let mut session = state.interview.lock().await;
        let engine = session.as_mut().ok_or_else(|| {
            AppError::Precondition("Start an interview first".to_string())
        })?;

        match engine.submit_answer(&request.answer)? {
            SubmitOutcome::Advanced { next_index } => {
                let next = QuestionView {
                    index: next_index,
                    total: engine.total_questions(),
                    question: engine
                        .question(next_index)
                        .expect("advanced index is in bounds")
                        .clone(),
                };
                return Ok(Json(AnswerResponse::InProgress { next }));
            }
            SubmitOutcome::ReadyForEvaluation { transcript } => transcript,
        }
    };

    // Phase 2: evaluate with the lock released; a restart or logout may
    // legitimately race with this call.
    let evaluation = state.generator.evaluate_answers(&transcript).await;

    // Phase 3: feed the outcome back into the machine.
    let mut session = state.interview.lock().await;
    let Some(engine) = session
        .as_mut()
        .filter(|e| matches!(e.state(), InterviewState::Evaluating { .. }))
    else {
        debug!("Discarding evaluation outcome: attempt was abandoned mid-flight");
        return Err(AppError::Precondition(
            "The interview attempt was abandoned".to_string(),
        ));
    };

    match evaluation {
        Ok(result) => {
            engine.complete(result.clone())?;
            state.profile.record_interview_score(result.score).await?;
            Ok(Json(AnswerResponse::Completed { result }))
        }
        Err(e) => {
            engine.rollback_evaluation();
            Err(e)
        }
    }
}

/// POST /api/v1/interview/restart
///
/// Returns the current attempt to NotStarted, keeping its question set.
pub async fn handle_restart(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    state.profile.ensure_logged_in().await?;

    let mut session = state.interview.lock().await;
    let engine = session.as_mut().ok_or_else(|| {
        AppError::Precondition("No interview to restart".to_string())
    })?;
    engine.restart();
    Ok(Json(serde_json::json!({ "status": "not_started" })))
}
