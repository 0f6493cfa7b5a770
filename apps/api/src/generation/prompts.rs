// All LLM prompt constants for the coaching pipeline.
// Each request's system prompt is a persona composed with the shared
// JSON-only fragment from llm_client::prompts.

/// Persona for résumé analysis.
pub const RESUME_ANALYST_PERSONA: &str =
    "You are an expert technical recruiter and career coach \
    extracting a structured skills profile from a resume.";

/// Résumé analysis prompt template. Replace `{resume_text}` before sending.
pub const RESUME_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze this resume text and extract skills, strengths, weaknesses, and missing skills for a generic tech role.

Return a JSON object with this EXACT schema (no extra fields):
{
  "skills": ["React", "PostgreSQL"],
  "strengths": ["Strong ownership of production systems"],
  "weaknesses": ["Little exposure to automated testing"],
  "missing_skills": ["Docker", "CI/CD"]
}

All four arrays are required. Keep each entry short.

RESUME TEXT:
{resume_text}"#;

/// Persona for career advice + roadmap generation.
pub const CAREER_COACH_PERSONA: &str =
    "You are an expert career coach producing actionable, role-specific growth plans.";

/// Career advice prompt template.
/// Replace: {target_role}, {skills}, {weaknesses}, {missing_skills}.
pub const CAREER_ADVICE_PROMPT_TEMPLATE: &str = r#"Based on the following resume analysis, provide a career recommendation for the role of {target_role} and a detailed learning roadmap.

Skills: {skills}
Weaknesses: {weaknesses}
Missing Skills: {missing_skills}

Return a JSON object with this EXACT schema (no extra fields):
{
  "recommendation": "One or two paragraphs of direct advice.",
  "roadmap": [
    {
      "title": "Master containerization",
      "description": "What to learn and why it matters for the role.",
      "resources": ["Docker docs", "A concrete course or book"],
      "duration": "3 weeks"
    }
  ]
}

Every roadmap step needs a non-empty title. Order steps from foundational to advanced."#;

/// Persona for interview question generation.
pub const INTERVIEWER_PERSONA: &str =
    "You are a senior interviewer preparing role-specific questions.";

/// Interview question prompt template.
/// Replace: {count}, {target_role}, {skills}.
pub const INTERVIEW_QUESTIONS_PROMPT_TEMPLATE: &str = r#"Generate {count} professional interview questions for a {target_role} candidate with these skills: {skills}.

Return a JSON array with this EXACT schema, exactly {count} entries, ids 1..{count}:
[
  {"id": 1, "question": "…"}
]

Mix technical depth with communication and design questions appropriate to the role."#;

/// Persona for interview answer evaluation.
pub const EVALUATOR_PERSONA: &str = "You are a fair, rigorous interview evaluator.";

/// Evaluation prompt template. Replace `{transcript}` with numbered Q/A pairs.
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"Evaluate the following interview answers and provide a score out of 10 and constructive feedback.

{transcript}

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 7.5,
  "feedback": "Specific, constructive feedback covering strengths and gaps."
}

The score must be a number between 0 and 10."#;
