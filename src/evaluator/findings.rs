//! Counter tally over an artifact tree.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::artifacts::ArtifactDir;
use crate::policy::LicensePolicy;
use crate::severity::Severity;

/// Aggregated finding counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Findings {
    pub critical_issues_count: u64,
    pub high_issues_count: u64,
    pub medium_issues_count: u64,
    pub low_issues_count: u64,
    pub secrets_count: u64,
    pub license_violations: u64,
}

impl Findings {
    pub fn count(&self, severity: Severity) -> u64 {
        match severity {
            Severity::Critical => self.critical_issues_count,
            Severity::High => self.high_issues_count,
            Severity::Medium => self.medium_issues_count,
            Severity::Low => self.low_issues_count,
        }
    }

    pub fn add(&mut self, severity: Severity, n: u64) {
        let slot = match severity {
            Severity::Critical => &mut self.critical_issues_count,
            Severity::High => &mut self.high_issues_count,
            Severity::Medium => &mut self.medium_issues_count,
            Severity::Low => &mut self.low_issues_count,
        };
        *slot = slot.saturating_add(n);
    }
}

/// A package whose license string contains a forbidden license.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseMatch {
    pub package: String,
    pub license: String,
}

/// Counters plus the license matches behind `license_violations`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub findings: Findings,
    pub license_matches: Vec<LicenseMatch>,
}

impl Tally {
    /// Tally every artifact directory. A file that fails to parse is
    /// logged and contributes nothing.
    pub fn collect(dirs: &[ArtifactDir], licenses: &LicensePolicy) -> Self {
        let mut tally = Self::default();
        for dir in dirs {
            tally.add_dir(dir, licenses);
        }
        debug!(findings = ?tally.findings, "Tally complete");
        tally
    }

    fn add_dir(&mut self, dir: &ArtifactDir, licenses: &LicensePolicy) {
        match dir.npm_audit_counts() {
            Some(Ok(audit)) => {
                let counts = &audit.metadata.vulnerabilities;
                self.findings.add(Severity::Critical, counts.critical);
                self.findings.add(Severity::High, counts.high);
                self.findings.add(Severity::Medium, counts.moderate);
                self.findings.add(Severity::Low, counts.low);
            }
            Some(Err(e)) => warn!(dir = %dir.name, error = %e, "Error processing npm audit"),
            None => {}
        }

        match dir.snyk_severities() {
            Some(Ok(snyk)) => {
                for vuln in &snyk.vulnerabilities {
                    if let Some(severity) = Severity::from_tier(&vuln.label()) {
                        self.findings.add(severity, 1);
                    }
                }
            }
            Some(Err(e)) => warn!(dir = %dir.name, error = %e, "Error processing Snyk results"),
            None => {}
        }

        match dir.secrets_audit() {
            Some(Ok(secrets)) => {
                self.findings.secrets_count = self.findings.secrets_count.saturating_add(secrets.total());
            }
            Some(Err(e)) => warn!(dir = %dir.name, error = %e, "Error processing secrets results"),
            None => {}
        }

        match dir.licenses() {
            Some(Ok(report)) => {
                for (package, info) in &report.packages {
                    let license = info
                        .licenses
                        .as_ref()
                        .map(|field| field.join(" "))
                        .unwrap_or_default();
                    if licenses.first_forbidden_in(&license).is_some() {
                        self.findings.license_violations =
                            self.findings.license_violations.saturating_add(1);
                        self.license_matches.push(LicenseMatch {
                            package: package.clone(),
                            license,
                        });
                    }
                }
            }
            Some(Err(e)) => warn!(dir = %dir.name, error = %e, "Error processing license results"),
            None => {}
        }
    }
}
