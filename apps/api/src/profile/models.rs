//! The user progress record and its component types.
//!
//! `UserProfile` is the root aggregate. It is owned exclusively by
//! `ProfileStore` — nothing else mutates it. All types serialize into the
//! durable session snapshot, so field changes must stay
//! backward-tolerant (`#[serde(default)]` on the aggregate).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque authenticated-user reference. Absence means logged out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl Identity {
    /// Derives a display name from the email local part.
    pub fn from_email(email: &str) -> Self {
        let name = email.split('@').next().unwrap_or(email).to_string();
        Self {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name,
        }
    }
}

/// Structured skills profile extracted from one résumé.
/// Produced atomically — a partial analysis is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    pub skills: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub missing_skills: Vec<String>,
    pub source_text: String,
}

/// One step of a generated learning roadmap. Display payload; the only
/// structural requirement is a non-empty title, enforced at generation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub title: String,
    pub description: String,
    pub resources: Vec<String>,
    pub duration: String,
}

/// `id` is unique within one career path's question set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub id: u32,
    pub question: String,
}

/// The role-specific bundle produced for exactly one selected role.
/// Always written as a single unit — never a mix of two roles' data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerPath {
    pub role: String,
    /// 0–100, computed locally by the skill matcher.
    pub readiness_score: u8,
    pub recommendation: String,
    pub roadmap: Vec<RoadmapStep>,
    pub interview_questions: Vec<InterviewQuestion>,
}

/// Root aggregate of all user progress.
///
/// Invariants (enforced by `ProfileStore`):
/// - `career_path.role == selected_role` whenever `career_path` is present.
/// - replacing `resume_analysis` clears `career_path` and `interview_score`.
/// - `interview_score` never outlives the `career_path` that produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub identity: Option<Identity>,
    pub resume_analysis: Option<ResumeAnalysis>,
    pub selected_role: Option<String>,
    pub career_path: Option<CareerPath>,
    /// Most recent completed mock-interview score, 0–10.
    pub interview_score: Option<f64>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    pub fn is_logged_in(&self) -> bool {
        self.identity.is_some()
    }
}
