//! Summary counters and advice for the consolidated report.

use serde::{Deserialize, Serialize};

/// Report-wide counters, summed over every artifact directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_vulnerabilities: u64,
    pub critical_vulnerabilities: u64,
    pub high_vulnerabilities: u64,
    pub medium_vulnerabilities: u64,
    pub low_vulnerabilities: u64,
    pub secrets_found: u64,
    pub license_issues: u64,
}

impl ReportSummary {
    /// Counts come straight from artifact files; sums saturate.
    pub fn add_vulnerabilities(&mut self, critical: u64, high: u64, medium: u64, low: u64) {
        self.critical_vulnerabilities = self.critical_vulnerabilities.saturating_add(critical);
        self.high_vulnerabilities = self.high_vulnerabilities.saturating_add(high);
        self.medium_vulnerabilities = self.medium_vulnerabilities.saturating_add(medium);
        self.low_vulnerabilities = self.low_vulnerabilities.saturating_add(low);
    }

    pub fn recompute_total(&mut self) {
        self.total_vulnerabilities = [
            self.high_vulnerabilities,
            self.medium_vulnerabilities,
            self.low_vulnerabilities,
        ]
        .into_iter()
        .fold(self.critical_vulnerabilities, u64::saturating_add);
    }

    /// Fixed-threshold advice followed by general hygiene items.
    pub fn recommendations(&self) -> Vec<String> {
        let mut recommendations = Vec::new();

        if self.critical_vulnerabilities > 0 {
            recommendations
                .push("\u{1F6A8} URGENT: Address all critical vulnerabilities immediately".to_string());
        }
        if self.high_vulnerabilities > 5 {
            recommendations.push(
                "\u{26A0}\u{FE0F} High priority: Review and fix high-severity vulnerabilities"
                    .to_string(),
            );
        }
        if self.secrets_found > 0 {
            recommendations.push(
                "\u{1F510} Remove all detected secrets and use environment variables or secure vaults"
                    .to_string(),
            );
        }
        if self.license_issues > 0 {
            recommendations
                .push("\u{1F4DC} Review and resolve license compliance issues".to_string());
        }

        recommendations.extend(
            [
                "\u{1F504} Keep dependencies updated regularly",
                "\u{1F9EA} Run security scans in CI/CD pipeline",
                "\u{1F4CB} Implement security code review practices",
                "\u{1F6E1}\u{FE0F} Use dependency pinning and lock files",
                "\u{1F4DD} Maintain an inventory of third-party components",
            ]
            .into_iter()
            .map(String::from),
        );

        recommendations
    }
}
