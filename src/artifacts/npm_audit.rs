//! `npm audit --json` output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NpmAudit {
    pub vulnerabilities: BTreeMap<String, NpmPackage>,
    pub metadata: NpmMetadata,
}

/// Only the severity totals of an npm audit. Advisory details are not
/// read, so an unexpected shape there cannot drop the counts.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NpmAuditCounts {
    pub metadata: NpmMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NpmMetadata {
    pub vulnerabilities: NpmSeverityCounts,
}

/// Severity totals as reported by npm. npm says `moderate` where the
/// other tools say `medium`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NpmSeverityCounts {
    pub critical: u64,
    pub high: u64,
    pub moderate: u64,
    pub low: u64,
    #[serde(skip_serializing)]
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NpmPackage {
    pub via: Vec<NpmVia>,
}

/// An entry of a package's `via` list: either the advisory itself or the
/// name of the dependency it is inherited through.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NpmVia {
    Dependency(String),
    Advisory(NpmAdvisory),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NpmAdvisory {
    pub title: Option<String>,
    pub severity: Option<String>,
    pub cwe: Vec<String>,
    pub cvss: Option<serde_json::Value>,
    pub url: String,
    pub range: String,
}

impl NpmAudit {
    /// Advisories paired with the package they were reported under.
    pub fn advisories(&self) -> impl Iterator<Item = (&str, &NpmAdvisory)> {
        self.vulnerabilities.iter().flat_map(|(package, entry)| {
            entry.via.iter().filter_map(move |via| match via {
                NpmVia::Advisory(advisory) => Some((package.as_str(), advisory)),
                NpmVia::Dependency(_) => None,
            })
        })
    }
}
