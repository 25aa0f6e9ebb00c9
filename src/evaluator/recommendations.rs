use serde::{Deserialize, Serialize};

use super::violation::PolicyViolation;
use crate::severity::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Urgent,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Urgent => "URGENT",
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: String,
    pub action: String,
    pub details: String,
}

impl Recommendation {
    fn new(priority: Priority, category: &str, action: &str, details: impl Into<String>) -> Self {
        Self {
            priority,
            category: category.to_string(),
            action: action.to_string(),
            details: details.into(),
        }
    }
}

/// Recommendations keyed by violation category, most urgent first, then
/// the standing process advice.
pub fn recommend(violations: &[PolicyViolation]) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    let critical = violations
        .iter()
        .filter(|v| v.severity() == Some(Severity::Critical))
        .count();
    if critical > 0 {
        recommendations.push(Recommendation::new(
            Priority::Urgent,
            "Vulnerabilities",
            "Fix all critical vulnerabilities immediately",
            format!("{critical} critical vulnerabilities require immediate attention"),
        ));
    }

    if violations
        .iter()
        .any(|v| matches!(v, PolicyViolation::SecretsDetected { .. }))
    {
        recommendations.push(Recommendation::new(
            Priority::High,
            "Secrets",
            "Remove detected secrets and implement proper secret management",
            "Use environment variables, secret managers, or encrypted configuration",
        ));
    }

    let licenses = violations
        .iter()
        .filter(|v| matches!(v, PolicyViolation::ForbiddenLicense { .. }))
        .count();
    if licenses > 0 {
        recommendations.push(Recommendation::new(
            Priority::Medium,
            "Compliance",
            "Review and replace packages with forbidden licenses",
            format!("{licenses} packages need license review"),
        ));
    }

    recommendations.push(Recommendation::new(
        Priority::Low,
        "Process",
        "Implement automated security scanning in CI/CD",
        "Prevent security issues from reaching production",
    ));
    recommendations.push(Recommendation::new(
        Priority::Low,
        "Monitoring",
        "Set up security monitoring and alerting",
        "Get notified about new vulnerabilities in dependencies",
    ));

    recommendations
}
