//! Typed requests against the content-generation collaborator.
//!
//! Each request declares its output schema as a serde type and validates the
//! response after deserialization; anything nonconforming is surfaced as a
//! generation (or evaluation) error, never stored.
//!
//! The `ContentGenerator` trait is the seam the orchestrator and interview
//! engine are tested through — `AppState` carries an `Arc<dyn ContentGenerator>`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::errors::AppError;
use crate::generation::prompts::{
    CAREER_ADVICE_PROMPT_TEMPLATE, CAREER_COACH_PERSONA, EVALUATION_PROMPT_TEMPLATE,
    EVALUATOR_PERSONA, INTERVIEWER_PERSONA, INTERVIEW_QUESTIONS_PROMPT_TEMPLATE,
    RESUME_ANALYSIS_PROMPT_TEMPLATE, RESUME_ANALYST_PERSONA,
};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;
use crate::profile::models::{InterviewQuestion, ResumeAnalysis, RoadmapStep};

// ────────────────────────────────────────────────────────────────────────────
// Response shapes
// ────────────────────────────────────────────────────────────────────────────

/// Career advice half of a role-selection pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerAdvice {
    pub recommendation: String,
    pub roadmap: Vec<RoadmapStep>,
}

/// One question/answer pair of a completed mock interview, in question order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// Outcome of an interview evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewResult {
    /// 0–10.
    pub score: f64,
    pub feedback: String,
}

/// Wire shape of a résumé analysis response (the stored `ResumeAnalysis`
/// additionally carries the source text).
#[derive(Debug, Deserialize)]
struct AnalysisPayload {
    skills: Vec<String>,
    strengths: Vec<String>,
    weaknesses: Vec<String>,
    missing_skills: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The content-generation collaborator. Every call either returns data
/// conforming to the declared schema or fails; there are no partial results.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn analyze_resume(&self, resume_text: &str) -> Result<ResumeAnalysis, AppError>;

    async fn career_advice(
        &self,
        analysis: &ResumeAnalysis,
        target_role: &str,
    ) -> Result<CareerAdvice, AppError>;

    async fn interview_questions(
        &self,
        analysis: &ResumeAnalysis,
        target_role: &str,
        count: usize,
    ) -> Result<Vec<InterviewQuestion>, AppError>;

    async fn evaluate_answers(&self, transcript: &[QaPair]) -> Result<InterviewResult, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LLM-backed implementation
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmContentGenerator {
    llm: LlmClient,
}

impl LlmContentGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

/// Composes a request persona with the shared JSON-only system fragment.
fn system_for(persona: &str) -> String {
    format!("{persona} {JSON_ONLY_SYSTEM}")
}

#[async_trait]
impl ContentGenerator for LlmContentGenerator {
    async fn analyze_resume(&self, resume_text: &str) -> Result<ResumeAnalysis, AppError> {
        let prompt = RESUME_ANALYSIS_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
        let payload: AnalysisPayload = self
            .llm
            .call_json(&prompt, &system_for(RESUME_ANALYST_PERSONA))
            .await
            .map_err(|e| AppError::Generation(format!("Resume analysis failed: {e}")))?;

        Ok(ResumeAnalysis {
            skills: payload.skills,
            strengths: payload.strengths,
            weaknesses: payload.weaknesses,
            missing_skills: payload.missing_skills,
            source_text: resume_text.to_string(),
        })
    }

    async fn career_advice(
        &self,
        analysis: &ResumeAnalysis,
        target_role: &str,
    ) -> Result<CareerAdvice, AppError> {
        let prompt = CAREER_ADVICE_PROMPT_TEMPLATE
            .replace("{target_role}", target_role)
            .replace("{skills}", &analysis.skills.join(", "))
            .replace("{weaknesses}", &analysis.weaknesses.join(", "))
            .replace("{missing_skills}", &analysis.missing_skills.join(", "));

        let advice: CareerAdvice = self
            .llm
            .call_json(&prompt, &system_for(CAREER_COACH_PERSONA))
            .await
            .map_err(|e| AppError::Generation(format!("Career advice failed: {e}")))?;

        validate_advice(&advice)?;
        Ok(advice)
    }

    async fn interview_questions(
        &self,
        analysis: &ResumeAnalysis,
        target_role: &str,
        count: usize,
    ) -> Result<Vec<InterviewQuestion>, AppError> {
        let prompt = INTERVIEW_QUESTIONS_PROMPT_TEMPLATE
            .replace("{count}", &count.to_string())
            .replace("{target_role}", target_role)
            .replace("{skills}", &analysis.skills.join(", "));

        let questions: Vec<InterviewQuestion> = self
            .llm
            .call_json(&prompt, &system_for(INTERVIEWER_PERSONA))
            .await
            .map_err(|e| AppError::Generation(format!("Question generation failed: {e}")))?;

        validate_questions(&questions, count)?;
        Ok(questions)
    }

    async fn evaluate_answers(&self, transcript: &[QaPair]) -> Result<InterviewResult, AppError> {
        let rendered = render_transcript(transcript);
        let prompt = EVALUATION_PROMPT_TEMPLATE.replace("{transcript}", &rendered);

        let result: InterviewResult = self
            .llm
            .call_json(&prompt, &system_for(EVALUATOR_PERSONA))
            .await
            .map_err(|e| AppError::Evaluation(format!("Evaluation failed: {e}")))?;

        validate_result(&result)?;
        Ok(result)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Schema validation
// ────────────────────────────────────────────────────────────────────────────

fn validate_advice(advice: &CareerAdvice) -> Result<(), AppError> {
    if advice.recommendation.trim().is_empty() {
        return Err(AppError::Generation(
            "Advice response has an empty recommendation".to_string(),
        ));
    }
    if advice.roadmap.iter().any(|s| s.title.trim().is_empty()) {
        return Err(AppError::Generation(
            "Advice response contains a roadmap step without a title".to_string(),
        ));
    }
    Ok(())
}

fn validate_questions(questions: &[InterviewQuestion], expected: usize) -> Result<(), AppError> {
    if questions.len() != expected {
        return Err(AppError::Generation(format!(
            "Expected {expected} interview questions, got {}",
            questions.len()
        )));
    }
    let ids: HashSet<u32> = questions.iter().map(|q| q.id).collect();
    if ids.len() != questions.len() {
        return Err(AppError::Generation(
            "Interview question ids are not unique".to_string(),
        ));
    }
    if questions.iter().any(|q| q.question.trim().is_empty()) {
        return Err(AppError::Generation(
            "Interview question set contains an empty question".to_string(),
        ));
    }
    Ok(())
}

fn validate_result(result: &InterviewResult) -> Result<(), AppError> {
    // NaN and infinities fail the range check too.
    if !(0.0..=10.0).contains(&result.score) {
        return Err(AppError::Evaluation(format!(
            "Evaluation score {} is outside 0–10",
            result.score
        )));
    }
    Ok(())
}

/// Renders QA pairs as the numbered transcript the evaluation prompt expects.
fn render_transcript(transcript: &[QaPair]) -> String {
    transcript
        .iter()
        .enumerate()
        .map(|(i, pair)| format!("Q{n}: {}\nA{n}: {}", pair.question, pair.answer, n = i + 1))
        .collect::<Vec<_>>()
        .join("\n\n")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: u32) -> InterviewQuestion {
        InterviewQuestion {
            id,
            question: format!("Question {id}?"),
        }
    }

    #[test]
    fn test_validate_questions_accepts_exact_count_with_unique_ids() {
        let questions: Vec<_> = (1..=5).map(question).collect();
        assert!(validate_questions(&questions, 5).is_ok());
    }

    #[test]
    fn test_validate_questions_rejects_wrong_count() {
        let questions: Vec<_> = (1..=4).map(question).collect();
        let err = validate_questions(&questions, 5).unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));
    }

    #[test]
    fn test_validate_questions_rejects_duplicate_ids() {
        let questions = vec![question(1), question(1)];
        let err = validate_questions(&questions, 2).unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));
    }

    #[test]
    fn test_validate_questions_rejects_blank_question_text() {
        let questions = vec![
            question(1),
            InterviewQuestion {
                id: 2,
                question: "   ".to_string(),
            },
        ];
        assert!(validate_questions(&questions, 2).is_err());
    }

    #[test]
    fn test_validate_advice_rejects_untitled_step() {
        let advice = CareerAdvice {
            recommendation: "Solid foundation, close the infra gap.".to_string(),
            roadmap: vec![RoadmapStep {
                title: "".to_string(),
                description: "…".to_string(),
                resources: vec![],
                duration: "2 weeks".to_string(),
            }],
        };
        assert!(validate_advice(&advice).is_err());
    }

    #[test]
    fn test_validate_result_bounds() {
        assert!(validate_result(&InterviewResult {
            score: 0.0,
            feedback: "…".to_string()
        })
        .is_ok());
        assert!(validate_result(&InterviewResult {
            score: 10.0,
            feedback: "…".to_string()
        })
        .is_ok());
        assert!(validate_result(&InterviewResult {
            score: 10.5,
            feedback: "…".to_string()
        })
        .is_err());
        assert!(validate_result(&InterviewResult {
            score: f64::NAN,
            feedback: "…".to_string()
        })
        .is_err());
    }

    #[test]
    fn test_render_transcript_numbers_pairs_in_order() {
        let transcript = vec![
            QaPair {
                question: "What is ownership?".to_string(),
                answer: "A move semantics model.".to_string(),
            },
            QaPair {
                question: "What is borrowing?".to_string(),
                answer: "Temporary shared or unique access.".to_string(),
            },
        ];
        let rendered = render_transcript(&transcript);
        assert!(rendered.starts_with("Q1: What is ownership?"));
        assert!(rendered.contains("A1: A move semantics model."));
        assert!(rendered.contains("Q2: What is borrowing?"));
    }

    #[test]
    fn test_analysis_payload_requires_all_four_arrays() {
        let bad = r#"{"skills": [], "strengths": [], "weaknesses": []}"#;
        assert!(serde_json::from_str::<AnalysisPayload>(bad).is_err());

        let good = r#"{"skills": ["Go"], "strengths": [], "weaknesses": [], "missing_skills": []}"#;
        let payload: AnalysisPayload = serde_json::from_str(good).unwrap();
        assert_eq!(payload.skills, vec!["Go"]);
    }
}
