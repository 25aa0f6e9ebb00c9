use serde::{Deserialize, Serialize};

use crate::policy::{Action, Exemption};
use crate::severity::Severity;

/// A policy rule that the tallied findings broke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PolicyViolation {
    VulnerabilityThreshold {
        severity: Severity,
        count: u64,
        max_allowed: u64,
        action: Action,
        message: String,
    },
    SecretsDetected {
        count: u64,
        action: Action,
        message: String,
    },
    ForbiddenLicense {
        package: String,
        license: String,
        action: Action,
        message: String,
    },
}

impl PolicyViolation {
    pub fn threshold(severity: Severity, count: u64, max_allowed: u64, action: Action) -> Self {
        PolicyViolation::VulnerabilityThreshold {
            severity,
            count,
            max_allowed,
            action,
            message: format!(
                "{} vulnerability threshold exceeded: {} > {}",
                severity.title(),
                count,
                max_allowed
            ),
        }
    }

    pub fn secrets(count: u64) -> Self {
        PolicyViolation::SecretsDetected {
            count,
            action: Action::Fail,
            message: format!("Secrets detected in codebase: {} found", count),
        }
    }

    pub fn forbidden_license(package: &str, license: &str) -> Self {
        PolicyViolation::ForbiddenLicense {
            package: package.to_string(),
            license: license.to_string(),
            action: Action::Review,
            message: format!("Package {} uses forbidden license: {}", package, license),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            PolicyViolation::VulnerabilityThreshold { message, .. }
            | PolicyViolation::SecretsDetected { message, .. }
            | PolicyViolation::ForbiddenLicense { message, .. } => message,
        }
    }

    pub fn severity(&self) -> Option<Severity> {
        match self {
            PolicyViolation::VulnerabilityThreshold { severity, .. } => Some(*severity),
            _ => None,
        }
    }
}

/// An exemption surfaced in the evaluation output.
///
/// Exemptions are reported only; they do not suppress violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "known_issue")]
pub struct ExemptionRecord {
    pub package: Option<String>,
    pub max_severity: String,
    pub reason: String,
}

impl From<&Exemption> for ExemptionRecord {
    fn from(exemption: &Exemption) -> Self {
        Self {
            package: exemption.name.clone(),
            max_severity: exemption.max_severity.clone(),
            reason: exemption.reason.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_violation_json_shape() {
        let violation = PolicyViolation::threshold(Severity::High, 12, 10, Action::Warn);
        let json = serde_json::to_value(&violation).unwrap();
        assert_eq!(json["type"], "vulnerability_threshold");
        assert_eq!(json["severity"], "high");
        assert_eq!(json["count"], 12);
        assert_eq!(json["max_allowed"], 10);
        assert_eq!(json["action"], "warn");
        assert_eq!(
            json["message"],
            "High vulnerability threshold exceeded: 12 > 10"
        );
    }

    #[test]
    fn test_secrets_violation_fails() {
        let violation = PolicyViolation::secrets(3);
        let json = serde_json::to_value(&violation).unwrap();
        assert_eq!(json["type"], "secrets_detected");
        assert_eq!(json["action"], "fail");
        assert_eq!(violation.message(), "Secrets detected in codebase: 3 found");
        assert_eq!(violation.severity(), None);
    }

    #[test]
    fn test_exemption_record_is_tagged_known_issue() {
        let record = ExemptionRecord::from(&Exemption {
            name: Some("lodash".to_string()),
            ..Exemption::default()
        });
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "known_issue");
        assert_eq!(json["package"], "lodash");
        assert_eq!(json["max_severity"], "low");
        assert_eq!(json["reason"], "Known acceptable risk");
    }
}
