//! Per-tool normalized views used by the consolidated report.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::artifacts::{LicenseReport, NpmAudit, NpmSeverityCounts, SecretsAudit, SnykTest};
use crate::severity::Severity;

const DESCRIPTION_LIMIT: usize = 200;
const UNKNOWN_LICENSE: &str = "Unknown";

/// Licenses that never count as a compliance issue. Matched as substrings.
pub const APPROVED_LICENSES: &[&str] = &[
    "MIT",
    "ISC",
    "Apache-2.0",
    "BSD-2-Clause",
    "BSD-3-Clause",
    "CC0-1.0",
    "Unlicense",
    "WTFPL",
    "0BSD",
];

/// A tool result, or the reason it could not be read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolOutcome<T> {
    Parsed(T),
    Failed(ToolFailure),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolFailure {
    pub tool: String,
    pub source: String,
    pub error: String,
}

impl ToolFailure {
    pub fn new(tool: &str, source: &str, error: impl ToString) -> Self {
        Self {
            tool: tool.to_string(),
            source: source.to_string(),
            error: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NpmAuditSummary {
    pub tool: String,
    pub source: String,
    pub total_vulnerabilities: u64,
    pub severity_breakdown: NpmSeverityCounts,
    pub vulnerabilities: Vec<NpmVulnerabilityDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NpmVulnerabilityDetail {
    pub package: String,
    pub title: String,
    pub severity: String,
    pub cwe: Vec<String>,
    pub cvss: serde_json::Value,
    pub url: String,
    pub range: String,
}

impl NpmAuditSummary {
    pub fn from_audit(source: &str, audit: &NpmAudit) -> Self {
        let vulnerabilities = audit
            .advisories()
            .map(|(package, advisory)| NpmVulnerabilityDetail {
                package: package.to_string(),
                title: advisory.title.clone().unwrap_or_else(|| "Unknown".to_string()),
                severity: advisory
                    .severity
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string()),
                cwe: advisory.cwe.clone(),
                cvss: advisory
                    .cvss
                    .clone()
                    .unwrap_or_else(|| serde_json::Value::Object(Default::default())),
                url: advisory.url.clone(),
                range: advisory.range.clone(),
            })
            .collect();

        Self {
            tool: "npm-audit".to_string(),
            source: source.to_string(),
            total_vulnerabilities: audit.metadata.vulnerabilities.total,
            severity_breakdown: audit.metadata.vulnerabilities.clone(),
            vulnerabilities,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SnykSeverityCounts {
    pub total: u64,
    pub critical: u64,
    pub high: u64,
    pub medium: u64,
    pub low: u64,
    /// Entries whose severity is none of the four tiers.
    pub other: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnykSummary {
    pub tool: String,
    pub source: String,
    pub summary: SnykSeverityCounts,
    pub vulnerabilities: Vec<SnykVulnerabilityDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnykVulnerabilityDetail {
    pub id: Option<String>,
    pub title: Option<String>,
    pub severity: String,
    pub package: Option<String>,
    pub version: Option<String>,
    pub cve: Vec<String>,
    pub cwe: Vec<String>,
    pub cvss_score: Option<f64>,
    pub exploit_maturity: Option<String>,
    pub description: String,
}

impl SnykSummary {
    pub fn from_test(source: &str, snyk: &SnykTest) -> Self {
        let mut summary = SnykSeverityCounts {
            total: snyk.vulnerabilities.len() as u64,
            ..Default::default()
        };
        let mut vulnerabilities = Vec::with_capacity(snyk.vulnerabilities.len());

        for vuln in &snyk.vulnerabilities {
            let severity = vuln.severity_label();
            match Severity::from_tier(&severity) {
                Some(Severity::Critical) => summary.critical += 1,
                Some(Severity::High) => summary.high += 1,
                Some(Severity::Medium) => summary.medium += 1,
                Some(Severity::Low) => summary.low += 1,
                None => summary.other += 1,
            }

            vulnerabilities.push(SnykVulnerabilityDetail {
                id: vuln.id.clone(),
                title: vuln.title.clone(),
                severity,
                package: vuln.package_name.clone(),
                version: vuln.version.clone(),
                cve: vuln.identifiers.cve.clone(),
                cwe: vuln.identifiers.cwe.clone(),
                cvss_score: vuln.cvss_score,
                exploit_maturity: vuln.exploit_maturity.clone(),
                description: truncate_description(&vuln.description),
            });
        }

        Self {
            tool: "snyk".to_string(),
            source: source.to_string(),
            summary,
            vulnerabilities,
        }
    }
}

fn truncate_description(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_LIMIT {
        let head: String = description.chars().take(DESCRIPTION_LIMIT).collect();
        format!("{head}...")
    } else {
        description.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretScanSummary {
    pub tools: Vec<String>,
    pub source: String,
    pub secrets_found: u64,
    pub secrets_by_type: BTreeMap<String, u64>,
    pub files_affected: Vec<String>,
    pub details: Vec<SecretDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretDetail {
    pub file: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub line: Option<u64>,
    pub is_verified: bool,
}

impl SecretScanSummary {
    pub fn from_audit(source: &str, audit: &SecretsAudit) -> Self {
        let mut secrets_by_type = BTreeMap::new();
        let mut files_affected = Vec::new();
        let mut details = Vec::new();

        for (file, entries) in &audit.results {
            if !entries.is_empty() {
                files_affected.push(file.clone());
            }
            for entry in entries {
                *secrets_by_type.entry(entry.kind.clone()).or_insert(0) += 1;
                details.push(SecretDetail {
                    file: file.clone(),
                    kind: entry.kind.clone(),
                    line: entry.line_number,
                    is_verified: entry.is_verified,
                });
            }
        }

        Self {
            tools: vec!["detect-secrets".to_string()],
            source: source.to_string(),
            secrets_found: details.len() as u64,
            secrets_by_type,
            files_affected,
            details,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseClass {
    Compliant,
    Unknown,
    NonCompliant,
}

impl LicenseClass {
    pub fn classify(license: &str) -> Self {
        if APPROVED_LICENSES.iter().any(|approved| license.contains(approved)) {
            LicenseClass::Compliant
        } else if license.is_empty() || license == UNKNOWN_LICENSE {
            LicenseClass::Unknown
        } else {
            LicenseClass::NonCompliant
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LicenseScanSummary {
    pub source: String,
    pub total_packages: u64,
    pub compliant_licenses: u64,
    pub non_compliant_licenses: u64,
    pub unknown_licenses: u64,
    pub license_breakdown: BTreeMap<String, u64>,
    pub non_compliant_packages: Vec<NonCompliantPackage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NonCompliantPackage {
    pub name: String,
    pub license: String,
    pub version: String,
    pub repository: String,
}

impl LicenseScanSummary {
    pub fn from_report(source: &str, report: &LicenseReport) -> Self {
        let mut summary = Self {
            source: source.to_string(),
            ..Default::default()
        };

        for (package, info) in &report.packages {
            summary.total_packages += 1;
            let license = info
                .licenses
                .as_ref()
                .map(|field| field.join(", "))
                .unwrap_or_else(|| UNKNOWN_LICENSE.to_string());

            *summary
                .license_breakdown
                .entry(license.clone())
                .or_insert(0) += 1;

            match LicenseClass::classify(&license) {
                LicenseClass::Compliant => summary.compliant_licenses += 1,
                LicenseClass::Unknown => summary.unknown_licenses += 1,
                LicenseClass::NonCompliant => {
                    summary.non_compliant_licenses += 1;
                    summary.non_compliant_packages.push(NonCompliantPackage {
                        name: package.clone(),
                        license,
                        version: info
                            .version
                            .clone()
                            .unwrap_or_else(|| "unknown".to_string()),
                        repository: info.repository.clone().unwrap_or_default(),
                    });
                }
            }
        }

        summary
    }
}
