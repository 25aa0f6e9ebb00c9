use crate::aggregator::SecurityReport;
use crate::evaluator::{Evaluation, GateStatus, Priority};
use crate::reporter::Reporter;
use crate::scoring::ScoreClass;
use colored::Colorize;

const SHOWN_VIOLATIONS: usize = 5;
const SHOWN_RECOMMENDATIONS: usize = 3;
const RULE_WIDTH: usize = 60;

/// Console output for both subcommands.
pub struct TerminalReporter {
    strict: bool,
}

impl TerminalReporter {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    fn gate_color(&self, status: GateStatus) -> colored::ColoredString {
        match status {
            GateStatus::Pass => status.as_str().green().bold(),
            GateStatus::Warn if self.strict => status.as_str().red().bold(),
            GateStatus::Warn => status.as_str().yellow().bold(),
            GateStatus::Fail => status.as_str().red().bold(),
        }
    }

    fn priority_color(&self, priority: Priority) -> colored::ColoredString {
        let label = format!("[{}]", priority.as_str());
        match priority {
            Priority::Urgent => label.red().bold(),
            Priority::High => label.yellow().bold(),
            Priority::Medium => label.cyan(),
            Priority::Low => label.white(),
        }
    }

    fn score_color(&self, report: &SecurityReport) -> colored::ColoredString {
        let label = format!("{}/100", report.security_score);
        match report.score_class() {
            ScoreClass::Excellent => label.green().bold(),
            ScoreClass::Good => label.yellow().bold(),
            ScoreClass::Poor => label.red().bold(),
        }
    }

    /// Evaluation summary: gate, counters, leading violations and
    /// recommendations.
    pub fn format_evaluation(&self, evaluation: &Evaluation) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut output = String::new();

        output.push_str(&format!("\n{}\n", rule));
        output.push_str(&format!("{}\n", "SECURITY POLICY EVALUATION SUMMARY".bold()));
        output.push_str(&format!("{}\n", rule));

        output.push_str(&format!(
            "Gate Status: {}\n",
            self.gate_color(evaluation.gate_status)
        ));
        output.push_str(&format!("Policy Version: {}\n", evaluation.policy_version));

        let findings = &evaluation.findings;
        output.push_str("\nFindings Summary:\n");
        output.push_str(&format!("  Critical Issues: {}\n", findings.critical_issues_count));
        output.push_str(&format!("  High Issues: {}\n", findings.high_issues_count));
        output.push_str(&format!("  Medium Issues: {}\n", findings.medium_issues_count));
        output.push_str(&format!("  Low Issues: {}\n", findings.low_issues_count));
        output.push_str(&format!("  Secrets Found: {}\n", findings.secrets_count));
        output.push_str(&format!("  License Violations: {}\n", findings.license_violations));

        let violations = &evaluation.policy_violations;
        if !violations.is_empty() {
            output.push_str(&format!(
                "\n{}\n",
                format!("Policy Violations ({}):", violations.len()).yellow()
            ));
            for (i, violation) in violations.iter().take(SHOWN_VIOLATIONS).enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, violation.message()));
            }
            if violations.len() > SHOWN_VIOLATIONS {
                output.push_str(&format!(
                    "  ... and {} more\n",
                    violations.len() - SHOWN_VIOLATIONS
                ));
            }
        }

        let recommendations = &evaluation.recommendations;
        if !recommendations.is_empty() {
            output.push_str("\nTop Recommendations:\n");
            for (i, rec) in recommendations.iter().take(SHOWN_RECOMMENDATIONS).enumerate() {
                output.push_str(&format!(
                    "  {}. {} {}\n",
                    i + 1,
                    self.priority_color(rec.priority),
                    rec.action
                ));
            }
        }

        output.push_str(&format!("\n{}\n", rule));
        output
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, report: &SecurityReport) -> String {
        let summary = &report.summary;
        format!(
            "\nSecurity Score: {}\nTotal Vulnerabilities: {}\nSecrets Found: {}\nLicense Issues: {}\n",
            self.score_color(report),
            summary.total_vulnerabilities,
            summary.secrets_found,
            summary.license_issues,
        )
    }
}
