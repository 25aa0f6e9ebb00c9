//! Discovery and parsing of per-tool scan artifacts.
//!
//! A reports directory holds one subdirectory per CI job artifact. Each
//! subdirectory may contain any of the known tool outputs:
//!
//! - `npm-audit.json` ([`NpmAudit`])
//! - `snyk-test.json` ([`SnykTest`])
//! - `secrets-audit.json` ([`SecretsAudit`])
//! - `licenses.json` ([`LicenseReport`])
//!
//! The schemas are the tools' native ones; only the fields used for
//! aggregation are modelled and everything else is ignored.

mod licenses;
mod npm_audit;
mod secrets;
mod snyk;

pub use licenses::{LicenseField, LicenseInfo, LicenseReport};
pub use npm_audit::{
    NpmAdvisory, NpmAudit, NpmAuditCounts, NpmMetadata, NpmPackage, NpmSeverityCounts, NpmVia,
};
pub use secrets::{SecretEntry, SecretsAudit};
pub use snyk::{SnykIdentifiers, SnykSeverities, SnykSeverity, SnykTest, SnykVulnerability};

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::error::{GateError, Result};

pub const NPM_AUDIT_FILE: &str = "npm-audit.json";
pub const SNYK_TEST_FILE: &str = "snyk-test.json";
pub const SECRETS_AUDIT_FILE: &str = "secrets-audit.json";
pub const LICENSES_FILE: &str = "licenses.json";

/// One artifact subdirectory of the reports directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDir {
    /// Directory name, used to tag per-tool results.
    pub name: String,
    pub path: PathBuf,
}

impl ArtifactDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }

    /// `None` when the artifact is absent, otherwise the parse outcome.
    pub fn npm_audit(&self) -> Option<Result<NpmAudit>> {
        self.load(NPM_AUDIT_FILE)
    }

    /// Severity totals only, for the policy gate.
    pub fn npm_audit_counts(&self) -> Option<Result<NpmAuditCounts>> {
        self.load(NPM_AUDIT_FILE)
    }

    pub fn snyk_test(&self) -> Option<Result<SnykTest>> {
        self.load(SNYK_TEST_FILE)
    }

    /// Per-entry severities only, for the policy gate.
    pub fn snyk_severities(&self) -> Option<Result<SnykSeverities>> {
        self.load(SNYK_TEST_FILE)
    }

    pub fn secrets_audit(&self) -> Option<Result<SecretsAudit>> {
        self.load(SECRETS_AUDIT_FILE)
    }

    pub fn licenses(&self) -> Option<Result<LicenseReport>> {
        self.load(LICENSES_FILE)
    }

    fn load<T: DeserializeOwned>(&self, file_name: &str) -> Option<Result<T>> {
        let path = self.path.join(file_name);
        if !path.is_file() {
            trace!(path = %path.display(), "Artifact not present");
            return None;
        }
        debug!(path = %path.display(), "Parsing artifact");
        Some(read_json(&path))
    }
}

/// List the artifact subdirectories of `root`, sorted by name.
///
/// Plain files directly under `root` are skipped.
pub fn discover(root: &Path) -> Result<Vec<ArtifactDir>> {
    if !root.is_dir() {
        return Err(GateError::NotADirectory(root.display().to_string()));
    }

    let dirs: Vec<ArtifactDir> = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .map(|entry| ArtifactDir::new(entry.into_path()))
        .collect();

    debug!(root = %root.display(), count = dirs.len(), "Discovered artifact directories");
    Ok(dirs)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| GateError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| GateError::JsonParseError {
        path: path.display().to_string(),
        source: e,
    })
}
