//! Policy evaluation: tally artifacts, compare against the policy, decide
//! the gate.

mod findings;
mod gate;
mod recommendations;
mod violation;

pub use findings::{Findings, LicenseMatch, Tally};
pub use gate::GateStatus;
pub use recommendations::{Priority, Recommendation, recommend};
pub use violation::{ExemptionRecord, PolicyViolation};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::policy::{Action, Policy};
use crate::severity::Severity;

/// The evaluation document written by `secgate evaluate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub policy_version: String,
    pub evaluation_timestamp: String,
    pub gate_status: GateStatus,
    pub findings: Findings,
    pub policy_violations: Vec<PolicyViolation>,
    pub recommendations: Vec<Recommendation>,
    pub exemptions_applied: Vec<ExemptionRecord>,
}

pub struct PolicyEvaluator<'a> {
    policy: &'a Policy,
}

impl<'a> PolicyEvaluator<'a> {
    pub fn new(policy: &'a Policy) -> Self {
        Self { policy }
    }

    pub fn evaluate(&self, tally: Tally) -> Evaluation {
        self.evaluate_at(tally, Utc::now())
    }

    /// Evaluate with a fixed timestamp.
    pub fn evaluate_at(&self, tally: Tally, now: DateTime<Utc>) -> Evaluation {
        let Tally {
            findings,
            license_matches,
        } = tally;

        let mut status = GateStatus::Pass;
        let mut violations = Vec::new();

        for severity in Severity::TIERS {
            let count = findings.count(severity);
            let threshold = self.policy.thresholds.for_severity(severity);
            if count <= threshold.max_allowed {
                continue;
            }
            match threshold.action {
                Action::Fail => status.escalate(GateStatus::Fail),
                Action::Warn => status.escalate(GateStatus::Warn),
                _ => {}
            }
            violations.push(PolicyViolation::threshold(
                severity,
                count,
                threshold.max_allowed,
                threshold.action,
            ));
        }

        if findings.secrets_count > 0 && self.policy.secrets.block_on_detection {
            violations.push(PolicyViolation::secrets(findings.secrets_count));
            status.escalate(GateStatus::Fail);
        }

        for found in &license_matches {
            violations.push(PolicyViolation::forbidden_license(
                &found.package,
                &found.license,
            ));
        }
        if !license_matches.is_empty() {
            status.escalate(GateStatus::Warn);
        }

        // Known gap: exemptions are surfaced but never suppress a violation.
        let exemptions_applied = self
            .policy
            .exemptions
            .known_issues
            .packages
            .iter()
            .map(ExemptionRecord::from)
            .collect();

        let recommendations = recommend(&violations);

        info!(
            gate = %status,
            violations = violations.len(),
            "Policy evaluation complete"
        );

        Evaluation {
            policy_version: self.policy.version.clone(),
            evaluation_timestamp: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            gate_status: status,
            findings,
            policy_violations: violations,
            recommendations,
            exemptions_applied,
        }
    }
}
