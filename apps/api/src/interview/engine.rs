//! Interview Session Engine — a finite-state machine for one mock-interview
//! attempt. Pure transitions; the async evaluation call is driven by the
//! handler layer, which reports its outcome back via `complete` or
//! `rollback_evaluation`.
//!
//! States: NotStarted → InProgress(index, answers) → Evaluating → Completed.
//! One engine per attempt; `restart` returns to NotStarted keeping the
//! question set, and a new role selection discards the engine entirely.

use crate::errors::AppError;
use crate::generation::requests::{InterviewResult, QaPair};
use crate::profile::models::InterviewQuestion;

#[derive(Debug, Clone, PartialEq)]
pub enum InterviewState {
    NotStarted,
    InProgress { index: usize, answers: Vec<String> },
    Evaluating { answers: Vec<String> },
    Completed { result: InterviewResult },
}

/// What a successful `submit_answer` led to.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Advanced to the next question.
    Advanced { next_index: usize },
    /// All questions answered; the full transcript is ready for evaluation.
    ReadyForEvaluation { transcript: Vec<QaPair> },
}

#[derive(Debug)]
pub struct InterviewEngine {
    questions: Vec<InterviewQuestion>,
    state: InterviewState,
}

impl InterviewEngine {
    /// Builds an engine over a non-empty question set.
    pub fn new(questions: Vec<InterviewQuestion>) -> Result<Self, AppError> {
        if questions.is_empty() {
            return Err(AppError::Precondition(
                "No interview questions generated yet".to_string(),
            ));
        }
        Ok(Self {
            questions,
            state: InterviewState::NotStarted,
        })
    }

    pub fn state(&self) -> &InterviewState {
        &self.state
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// The question at `index`, for presenting the current prompt.
    pub fn question(&self, index: usize) -> Option<&InterviewQuestion> {
        self.questions.get(index)
    }

    /// NotStarted → InProgress(0, []). Returns the first question.
    pub fn start(&mut self) -> Result<&InterviewQuestion, AppError> {
        match self.state {
            InterviewState::NotStarted => {
                self.state = InterviewState::InProgress {
                    index: 0,
                    answers: Vec::new(),
                };
                Ok(&self.questions[0])
            }
            _ => Err(AppError::Precondition(
                "Interview already started".to_string(),
            )),
        }
    }

    /// Records the answer to the current question.
    ///
    /// Empty or whitespace-only answers are rejected without advancing. On
    /// the last question the engine moves to Evaluating and hands back the
    /// complete ordered transcript.
    pub fn submit_answer(&mut self, text: &str) -> Result<SubmitOutcome, AppError> {
        let InterviewState::InProgress { index, answers } = &mut self.state else {
            return Err(AppError::Precondition(
                "No question awaiting an answer".to_string(),
            ));
        };

        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "Answer cannot be empty".to_string(),
            ));
        }

        answers.push(text.to_string());

        if *index < self.questions.len() - 1 {
            *index += 1;
            Ok(SubmitOutcome::Advanced { next_index: *index })
        } else {
            let answers = std::mem::take(answers);
            let transcript = self
                .questions
                .iter()
                .zip(&answers)
                .map(|(q, a)| QaPair {
                    question: q.question.clone(),
                    answer: a.clone(),
                })
                .collect();
            self.state = InterviewState::Evaluating { answers };
            Ok(SubmitOutcome::ReadyForEvaluation { transcript })
        }
    }

    /// Evaluating → Completed.
    pub fn complete(&mut self, result: InterviewResult) -> Result<(), AppError> {
        match self.state {
            InterviewState::Evaluating { .. } => {
                self.state = InterviewState::Completed { result };
                Ok(())
            }
            _ => Err(AppError::Precondition(
                "No evaluation in flight".to_string(),
            )),
        }
    }

    /// Evaluating → InProgress on the last question, with the final answer
    /// dropped so it can be resubmitted. Earlier answers are kept — a failed
    /// evaluation never discards what the user already typed.
    pub fn rollback_evaluation(&mut self) {
        if let InterviewState::Evaluating { answers } = &mut self.state {
            let mut answers = std::mem::take(answers);
            answers.pop();
            self.state = InterviewState::InProgress {
                index: self.questions.len() - 1,
                answers,
            };
        }
    }

    /// Any state → NotStarted, discarding answers and result.
    pub fn restart(&mut self) {
        self.state = InterviewState::NotStarted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(n: u32) -> Vec<InterviewQuestion> {
        (1..=n)
            .map(|id| InterviewQuestion {
                id,
                question: format!("Question {id}?"),
            })
            .collect()
    }

    fn engine(n: u32) -> InterviewEngine {
        InterviewEngine::new(questions(n)).unwrap()
    }

    #[test]
    fn test_empty_question_set_is_rejected() {
        let err = InterviewEngine::new(vec![]).unwrap_err();
        assert!(matches!(err, AppError::Precondition(_)));
    }

    #[test]
    fn test_exactly_n_answers_reach_evaluating() {
        let mut engine = engine(5);
        engine.start().unwrap();

        for i in 0..4 {
            let outcome = engine.submit_answer(&format!("answer {i}")).unwrap();
            assert_eq!(outcome, SubmitOutcome::Advanced { next_index: i + 1 });
        }

        let outcome = engine.submit_answer("final answer").unwrap();
        let SubmitOutcome::ReadyForEvaluation { transcript } = outcome else {
            panic!("fifth answer must trigger evaluation");
        };
        assert_eq!(transcript.len(), 5);
        assert_eq!(transcript[4].answer, "final answer");
        assert_eq!(transcript[0].question, "Question 1?");
        assert!(matches!(engine.state(), InterviewState::Evaluating { .. }));
    }

    #[test]
    fn test_fewer_than_n_answers_never_evaluate() {
        let mut engine = engine(3);
        engine.start().unwrap();
        engine.submit_answer("a").unwrap();
        engine.submit_answer("b").unwrap();
        assert!(matches!(
            engine.state(),
            InterviewState::InProgress { index: 2, .. }
        ));
    }

    #[test]
    fn test_single_question_interview_is_supported() {
        let mut engine = engine(1);
        engine.start().unwrap();
        let outcome = engine.submit_answer("only answer").unwrap();
        assert!(matches!(outcome, SubmitOutcome::ReadyForEvaluation { .. }));
    }

    #[test]
    fn test_blank_answers_are_rejected_without_advancing() {
        let mut engine = engine(3);
        engine.start().unwrap();

        for bad in ["", "   ", "\n\t"] {
            let err = engine.submit_answer(bad).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
        assert!(matches!(
            engine.state(),
            InterviewState::InProgress { index: 0, answers } if answers.is_empty()
        ));
    }

    #[test]
    fn test_submit_before_start_is_precondition_error() {
        let mut engine = engine(3);
        let err = engine.submit_answer("answer").unwrap_err();
        assert!(matches!(err, AppError::Precondition(_)));
    }

    #[test]
    fn test_evaluation_failure_rolls_back_to_last_question() {
        let mut engine = engine(5);
        engine.start().unwrap();
        for i in 1..=5 {
            engine.submit_answer(&format!("answer {i}")).unwrap();
        }

        engine.rollback_evaluation();

        // Back on the last question with the first four answers intact; the
        // fifth is dropped so the user can resubmit it alone.
        let InterviewState::InProgress { index, answers } = engine.state() else {
            panic!("rollback must land in InProgress");
        };
        assert_eq!(*index, 4);
        assert_eq!(answers.len(), 4);
        assert_eq!(answers[3], "answer 4");

        // Resubmitting just the last answer evaluates again.
        let outcome = engine.submit_answer("answer 5, take two").unwrap();
        assert!(matches!(outcome, SubmitOutcome::ReadyForEvaluation { .. }));
    }

    #[test]
    fn test_complete_then_restart_discards_result_not_questions() {
        let mut engine = engine(2);
        engine.start().unwrap();
        engine.submit_answer("a").unwrap();
        engine.submit_answer("b").unwrap();
        engine
            .complete(InterviewResult {
                score: 6.5,
                feedback: "decent".to_string(),
            })
            .unwrap();
        assert!(matches!(engine.state(), InterviewState::Completed { .. }));

        engine.restart();
        assert_eq!(*engine.state(), InterviewState::NotStarted);
        assert_eq!(engine.total_questions(), 2);
        engine.start().unwrap();
    }

    #[test]
    fn test_complete_outside_evaluating_is_rejected() {
        let mut engine = engine(2);
        let err = engine
            .complete(InterviewResult {
                score: 1.0,
                feedback: "…".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, AppError::Precondition(_)));
    }
}
