//! Readiness scoring — deterministic skill matching against a role's
//! requirement profile. Pure, no I/O, total over its inputs.

/// Neutral score for roles without a defined requirement profile.
/// A deliberate fallback, not an error.
const NEUTRAL_SCORE: u8 = 70;

/// Percentage estimate of how well `resume_skills` cover `required`.
///
/// A required skill counts as matched when any resume skill satisfies a
/// symmetric case-insensitive substring test ("JS" matches "JavaScript" and
/// vice versa). This deliberately trades some false positives for coverage
/// of abbreviations and variants.
pub fn readiness_score(resume_skills: &[String], required: &[&str]) -> u8 {
    if required.is_empty() {
        return NEUTRAL_SCORE;
    }

    let resume_lower: Vec<String> = resume_skills.iter().map(|s| s.to_lowercase()).collect();

    let matched = required
        .iter()
        .filter(|req| {
            let req_lower = req.to_lowercase();
            resume_lower
                .iter()
                .any(|have| have.contains(&req_lower) || req_lower.contains(have.as_str()))
        })
        .count();

    let score = (100.0 * matched as f64 / required.len() as f64).round();
    score.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::required_skills;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_two_of_four_requirements_scores_fifty() {
        let resume = skills(&["React", "Node.js", "SQL"]);
        let required = ["React", "TypeScript", "Node.js", "Docker"];
        assert_eq!(readiness_score(&resume, &required), 50);
    }

    #[test]
    fn test_no_requirements_is_neutral_seventy() {
        assert_eq!(readiness_score(&skills(&["React"]), &[]), 70);
        assert_eq!(readiness_score(&[], &[]), 70);
    }

    #[test]
    fn test_no_resume_skills_scores_zero() {
        assert_eq!(readiness_score(&[], &["React", "Docker"]), 0);
    }

    #[test]
    fn test_full_coverage_scores_hundred() {
        let resume = skills(&["React", "Docker"]);
        assert_eq!(readiness_score(&resume, &["React", "Docker"]), 100);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let resume = skills(&["react", "DOCKER"]);
        assert_eq!(readiness_score(&resume, &["React", "Docker"]), 100);
    }

    #[test]
    fn test_containment_is_symmetric() {
        // Resume skill contained in the requirement…
        assert_eq!(readiness_score(&skills(&["Java"]), &["JavaScript"]), 100);
        // …and the requirement contained in the resume skill.
        assert_eq!(readiness_score(&skills(&["Node.js runtime"]), &["Node.js"]), 100);
    }

    #[test]
    fn test_rounding_follows_round_half_up() {
        // 1 of 3 → 33.33 → 33; 2 of 3 → 66.67 → 67.
        assert_eq!(readiness_score(&skills(&["Go"]), &["Go", "Rust", "C"]), 33);
        assert_eq!(readiness_score(&skills(&["Go", "Rust"]), &["Go", "Rust", "C"]), 67);
    }

    #[test]
    fn test_duplicate_resume_skills_do_not_inflate_score() {
        let resume = skills(&["React", "React", "React"]);
        let required = ["React", "TypeScript"];
        assert_eq!(readiness_score(&resume, &required), 50);
    }

    #[test]
    fn test_score_against_catalog_role() {
        // Data Scientist has 9 requirements; Python, SQL, and Pandas match
        // exactly three of them → round(100 * 3/9) = 33.
        let resume = skills(&["Python", "SQL", "Pandas"]);
        assert_eq!(readiness_score(&resume, required_skills("Data Scientist")), 33);
    }
}
