//! Static role catalog — the coached roles and their skill requirement profiles.
//!
//! The catalog is fixed at compile time. Readiness scoring and role selection
//! both look requirements up here; an unknown role has no requirement profile.

/// Every role a user can target, in display order.
pub const JOB_ROLES: [&str; 10] = [
    "Frontend Engineer",
    "Backend Engineer",
    "Fullstack Developer",
    "Data Scientist",
    "Product Manager",
    "UX/UI Designer",
    "DevOps Engineer",
    "Mobile Developer",
    "Cybersecurity Analyst",
    "Cloud Architect",
];

/// Returns the skill requirement profile for a role.
/// Unknown roles have an empty profile — scoring treats that as "no defined requirements".
pub fn required_skills(role: &str) -> &'static [&'static str] {
    match role {
        "Frontend Engineer" => &[
            "React",
            "TypeScript",
            "Tailwind CSS",
            "Next.js",
            "State Management",
            "Testing (Jest/Cypress)",
            "Browser APIs",
            "Performance Optimization",
        ],
        "Backend Engineer" => &[
            "Node.js",
            "Python",
            "Go",
            "PostgreSQL",
            "Redis",
            "Microservices",
            "API Design",
            "Docker",
            "Authentication",
        ],
        "Fullstack Developer" => &[
            "React",
            "Node.js",
            "PostgreSQL",
            "TypeScript",
            "System Design",
            "Cloud Services",
            "Deployment",
            "Version Control",
        ],
        "Data Scientist" => &[
            "Python",
            "SQL",
            "Machine Learning",
            "Statistics",
            "Data Visualization",
            "Pandas",
            "Scikit-Learn",
            "Big Data",
            "Spark",
        ],
        "Product Manager" => &[
            "Strategy",
            "User Research",
            "Agile",
            "Roadmapping",
            "Data Analysis",
            "Communication",
            "Stakeholder Management",
        ],
        "UX/UI Designer" => &[
            "Figma",
            "User Research",
            "Wireframing",
            "Prototyping",
            "Design Systems",
            "Typography",
            "Visual Design",
            "Accessibility",
        ],
        "DevOps Engineer" => &[
            "CI/CD",
            "Kubernetes",
            "AWS/Azure/GCP",
            "Terraform",
            "Monitoring",
            "Security",
            "Linux",
            "Networking",
        ],
        "Mobile Developer" => &[
            "React Native",
            "Swift",
            "Kotlin",
            "Flutter",
            "Mobile UI",
            "Native APIs",
            "App Store Guidelines",
        ],
        "Cybersecurity Analyst" => &[
            "Network Security",
            "Threat Hunting",
            "Compliance",
            "SIEM",
            "Vulnerability Assessment",
            "Cloud Security",
            "Cryptography",
        ],
        "Cloud Architect" => &[
            "AWS/Azure",
            "Serverless",
            "Security",
            "Networking",
            "Database Design",
            "Cost Optimization",
            "Hybrid Cloud",
        ],
        _ => &[],
    }
}

/// Whether `role` is part of the fixed catalog.
pub fn is_known_role(role: &str) -> bool {
    JOB_ROLES.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_catalog_role_has_requirements() {
        for role in JOB_ROLES {
            assert!(
                !required_skills(role).is_empty(),
                "role {role} has no requirement profile"
            );
        }
    }

    #[test]
    fn test_unknown_role_has_empty_profile() {
        assert!(required_skills("Underwater Basket Weaver").is_empty());
        assert!(!is_known_role("Underwater Basket Weaver"));
    }

    #[test]
    fn test_lookup_is_case_sensitive_on_role_names() {
        // Role names come from the catalog itself, never free text.
        assert!(required_skills("frontend engineer").is_empty());
        assert!(is_known_role("Frontend Engineer"));
    }
}
