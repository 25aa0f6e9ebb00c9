//! `license-checker --json` output: an object keyed by `name@version`.

use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct LicenseReport {
    pub packages: BTreeMap<String, LicenseInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LicenseInfo {
    pub licenses: Option<LicenseField>,
    pub version: Option<String>,
    pub repository: Option<String>,
}

/// license-checker emits a single SPDX string or a list for dual licenses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LicenseField {
    Single(String),
    Multiple(Vec<String>),
}

impl LicenseField {
    pub fn join(&self, separator: &str) -> String {
        match self {
            LicenseField::Single(s) => s.clone(),
            LicenseField::Multiple(list) => list.join(separator),
        }
    }
}
