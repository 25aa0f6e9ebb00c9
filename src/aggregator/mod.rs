//! Aggregation layer for the consolidated report.
//!
//! This module turns an artifact tree into a [`SecurityReport`]:
//! - Normalizes each tool's native schema
//! - Sums severity counters across artifact directories
//! - Calculates the security score
//! - Generates recommendations
//!
//! Rendering lives in [`crate::reporter`].

pub mod normalize;
pub mod summary;

pub use normalize::{
    APPROVED_LICENSES, LicenseClass, LicenseScanSummary, NonCompliantPackage, NpmAuditSummary,
    NpmVulnerabilityDetail, SecretDetail, SecretScanSummary, SnykSeverityCounts, SnykSummary,
    SnykVulnerabilityDetail, ToolFailure, ToolOutcome,
};
pub use summary::ReportSummary;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::artifacts::ArtifactDir;
use crate::scoring::{ScoreClass, security_score};

pub const GENERATOR_NAME: &str = "secgate";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportMetadata {
    pub generated_at: String,
    pub generator: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DependencyScan {
    pub npm_audit: Vec<ToolOutcome<NpmAuditSummary>>,
    pub snyk: Vec<ToolOutcome<SnykSummary>>,
}

/// Per-tool results, one entry per artifact directory that produced them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanResults {
    pub dependency_scan: DependencyScan,
    pub secret_scan: Vec<ToolOutcome<SecretScanSummary>>,
    pub license_scan: Vec<ToolOutcome<LicenseScanSummary>>,
}

/// The consolidated report written by `secgate report`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecurityReport {
    pub metadata: ReportMetadata,
    pub summary: ReportSummary,
    pub scan_results: ScanResults,
    pub recommendations: Vec<String>,
    pub security_score: u32,
}

impl SecurityReport {
    pub fn score_class(&self) -> ScoreClass {
        ScoreClass::from_score(self.security_score)
    }
}

/// Builder folding artifact directories into a [`SecurityReport`].
#[derive(Debug, Default)]
pub struct ReportBuilder {
    summary: ReportSummary,
    scan_results: ScanResults,
    generated_at: Option<DateTime<Utc>>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the report timestamp instead of using the build time.
    pub fn with_generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    pub fn with_dirs(mut self, dirs: &[ArtifactDir]) -> Self {
        for dir in dirs {
            self.add_dir(dir);
        }
        self
    }

    /// Normalize one artifact directory. Parse failures are recorded in
    /// the scan results and contribute nothing to the summary.
    pub fn add_dir(&mut self, dir: &ArtifactDir) {
        let source = dir.name.as_str();

        if let Some(outcome) = dir.npm_audit() {
            let entry = match outcome {
                Ok(audit) => {
                    let npm = NpmAuditSummary::from_audit(source, &audit);
                    let counts = &npm.severity_breakdown;
                    self.summary
                        .add_vulnerabilities(counts.critical, counts.high, counts.moderate, counts.low);
                    ToolOutcome::Parsed(npm)
                }
                Err(e) => {
                    warn!(dir = %source, error = %e, "Error processing npm audit");
                    ToolOutcome::Failed(ToolFailure::new("npm-audit", source, e))
                }
            };
            self.scan_results.dependency_scan.npm_audit.push(entry);
        }

        if let Some(outcome) = dir.snyk_test() {
            let entry = match outcome {
                Ok(test) => {
                    let snyk = SnykSummary::from_test(source, &test);
                    let counts = &snyk.summary;
                    self.summary
                        .add_vulnerabilities(counts.critical, counts.high, counts.medium, counts.low);
                    ToolOutcome::Parsed(snyk)
                }
                Err(e) => {
                    warn!(dir = %source, error = %e, "Error processing Snyk results");
                    ToolOutcome::Failed(ToolFailure::new("snyk", source, e))
                }
            };
            self.scan_results.dependency_scan.snyk.push(entry);
        }

        match dir.secrets_audit() {
            Some(Ok(audit)) => {
                let secrets = SecretScanSummary::from_audit(source, &audit);
                if secrets.secrets_found > 0 {
                    self.summary.secrets_found =
                        self.summary.secrets_found.saturating_add(secrets.secrets_found);
                    self.scan_results.secret_scan.push(ToolOutcome::Parsed(secrets));
                }
            }
            Some(Err(e)) => {
                warn!(dir = %source, error = %e, "Error processing secret scan results");
                self.scan_results
                    .secret_scan
                    .push(ToolOutcome::Failed(ToolFailure::new("detect-secrets", source, e)));
            }
            None => {}
        }

        match dir.licenses() {
            Some(Ok(report)) => {
                let licenses = LicenseScanSummary::from_report(source, &report);
                if licenses.total_packages > 0 {
                    self.summary.license_issues = self
                        .summary
                        .license_issues
                        .saturating_add(licenses.non_compliant_licenses);
                    self.scan_results
                        .license_scan
                        .push(ToolOutcome::Parsed(licenses));
                }
            }
            Some(Err(e)) => {
                warn!(dir = %source, error = %e, "Error processing license scan results");
                self.scan_results
                    .license_scan
                    .push(ToolOutcome::Failed(ToolFailure::new("license-checker", source, e)));
            }
            None => {}
        }

        debug!(dir = %source, summary = ?self.summary, "Artifact directory aggregated");
    }

    pub fn build(self) -> SecurityReport {
        let mut summary = self.summary;
        summary.recompute_total();

        let generated_at = self.generated_at.unwrap_or_else(Utc::now);
        let recommendations = summary.recommendations();
        let security_score = security_score(&summary);

        SecurityReport {
            metadata: ReportMetadata {
                generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                generator: GENERATOR_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            summary,
            scan_results: self.scan_results,
            recommendations,
            security_score,
        }
    }
}
