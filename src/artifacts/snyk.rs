//! `snyk test --json` output.

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SnykTest {
    pub vulnerabilities: Vec<SnykVulnerability>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnykVulnerability {
    pub id: Option<String>,
    pub title: Option<String>,
    pub severity: Option<String>,
    pub package_name: Option<String>,
    pub version: Option<String>,
    pub identifiers: SnykIdentifiers,
    pub cvss_score: Option<f64>,
    pub exploit_maturity: Option<String>,
    pub description: String,
}

impl SnykVulnerability {
    /// Lowercased severity, `unknown` when the field is absent.
    pub fn severity_label(&self) -> String {
        severity_label(self.severity.as_deref())
    }
}

/// Severities only, one per vulnerability entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SnykSeverities {
    pub vulnerabilities: Vec<SnykSeverity>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SnykSeverity {
    pub severity: Option<String>,
}

impl SnykSeverity {
    pub fn label(&self) -> String {
        severity_label(self.severity.as_deref())
    }
}

fn severity_label(severity: Option<&str>) -> String {
    severity.unwrap_or("unknown").to_lowercase()
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SnykIdentifiers {
    #[serde(rename = "CVE")]
    pub cve: Vec<String>,
    #[serde(rename = "CWE")]
    pub cwe: Vec<String>,
}
