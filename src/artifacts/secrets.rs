//! `detect-secrets scan` output.

use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SecretsAudit {
    /// Detected secrets keyed by file path.
    pub results: BTreeMap<String, Vec<SecretEntry>>,
}

impl SecretsAudit {
    pub fn total(&self) -> u64 {
        self.results.values().map(|entries| entries.len() as u64).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SecretEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub line_number: Option<u64>,
    pub is_verified: bool,
}

impl Default for SecretEntry {
    fn default() -> Self {
        Self {
            kind: "unknown".to_string(),
            line_number: None,
            is_verified: false,
        }
    }
}
