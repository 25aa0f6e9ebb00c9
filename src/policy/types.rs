//! Policy document types.

use serde::{Deserialize, Serialize};

use crate::severity::Severity;

const DEFAULT_MAX_ALLOWED: u64 = 999;
const DEFAULT_POLICY_VERSION: &str = "1.0";
const DEFAULT_EXEMPTION_SEVERITY: &str = "low";
const DEFAULT_EXEMPTION_REASON: &str = "Known acceptable risk";

/// Security policy: thresholds, secret blocking, forbidden licenses and exemptions.
///
/// Every field has a default so a partial document still loads.
/// Example:
/// ```yaml
/// name: Team Policy
/// version: "2.1"
/// thresholds:
///   critical: { max_allowed: 0, action: fail }
///   high: { max_allowed: 5, action: warn }
/// secrets:
///   block_on_detection: true
/// licenses:
///   forbidden: [GPL, AGPL]
/// exemptions:
///   known_issues:
///     packages:
///       - name: lodash
///         max_severity: medium
///         reason: Prototype pollution not reachable
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    pub name: Option<String>,
    #[serde(deserialize_with = "version_string")]
    pub version: String,
    pub thresholds: Thresholds,
    pub secrets: SecretsPolicy,
    pub licenses: LicensePolicy,
    pub exemptions: Exemptions,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            name: None,
            version: DEFAULT_POLICY_VERSION.to_string(),
            thresholds: Thresholds::default(),
            secrets: SecretsPolicy::default(),
            licenses: LicensePolicy::default(),
            exemptions: Exemptions::default(),
        }
    }
}

impl Policy {
    /// Policy used when no policy document can be loaded.
    pub fn built_in() -> Self {
        Self {
            name: Some("Default Security Policy".to_string()),
            version: DEFAULT_POLICY_VERSION.to_string(),
            thresholds: Thresholds {
                critical: Some(Threshold::new(0, Action::Fail)),
                high: Some(Threshold::new(10, Action::Warn)),
                medium: Some(Threshold::new(25, Action::Info)),
                low: Some(Threshold::new(50, Action::Track)),
            },
            secrets: SecretsPolicy {
                block_on_detection: true,
            },
            licenses: LicensePolicy {
                forbidden: ["GPL", "GPL-2.0", "GPL-3.0", "AGPL", "LGPL"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
            exemptions: Exemptions::default(),
        }
    }
}

/// Accepts `version: 2`, `version: 1.0` and `version: "1.0"` alike.
fn version_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => s,
        Scalar::Int(i) => i.to_string(),
        Scalar::Float(f) => format!("{f:?}"),
    })
}

/// Accepts any number. Fractions round down, which keeps `count > max`
/// unchanged for integer counts; negatives clamp to zero.
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Unsigned(u64),
        Signed(i64),
        Float(f64),
    }

    Ok(match Number::deserialize(deserializer)? {
        Number::Unsigned(n) => n,
        Number::Signed(_) => 0,
        Number::Float(f) if f.is_nan() || f <= 0.0 => 0,
        Number::Float(f) => f.floor() as u64,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical: Option<Threshold>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Threshold>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<Threshold>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Threshold>,
}

impl Thresholds {
    /// Effective threshold for a tier. Unconfigured tiers only track.
    pub fn for_severity(&self, severity: Severity) -> Threshold {
        let configured = match severity {
            Severity::Critical => &self.critical,
            Severity::High => &self.high,
            Severity::Medium => &self.medium,
            Severity::Low => &self.low,
        };
        configured.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Threshold {
    #[serde(deserialize_with = "lenient_count")]
    pub max_allowed: u64,
    pub action: Action,
}

impl Threshold {
    pub fn new(max_allowed: u64, action: Action) -> Self {
        Self {
            max_allowed,
            action,
        }
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ALLOWED, Action::Track)
    }
}

/// What a policy violation does to the gate.
///
/// Only `fail` and `warn` change the gate; everything else is recorded.
/// Unrecognized strings are kept verbatim so they round-trip into the
/// evaluation output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Action {
    Fail,
    Warn,
    Info,
    #[default]
    Track,
    Review,
    Other(String),
}

impl Action {
    pub fn as_str(&self) -> &str {
        match self {
            Action::Fail => "fail",
            Action::Warn => "warn",
            Action::Info => "info",
            Action::Track => "track",
            Action::Review => "review",
            Action::Other(s) => s,
        }
    }
}

impl From<String> for Action {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "fail" => Action::Fail,
            "warn" => Action::Warn,
            "info" => Action::Info,
            "track" => Action::Track,
            "review" => Action::Review,
            _ => Action::Other(s),
        }
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        action.as_str().to_string()
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecretsPolicy {
    pub block_on_detection: bool,
}

impl Default for SecretsPolicy {
    fn default() -> Self {
        Self {
            block_on_detection: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LicensePolicy {
    pub forbidden: Vec<String>,
}

impl LicensePolicy {
    /// First forbidden entry contained (case-insensitively) in `licenses`.
    pub fn first_forbidden_in(&self, licenses: &str) -> Option<&str> {
        let haystack = licenses.to_lowercase();
        self.forbidden
            .iter()
            .find(|forbidden| haystack.contains(&forbidden.to_lowercase()))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exemptions {
    pub known_issues: KnownIssues,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnownIssues {
    pub packages: Vec<Exemption>,
}

/// A declared allowance for a known issue in a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exemption {
    pub name: Option<String>,
    pub max_severity: String,
    pub reason: String,
}

impl Default for Exemption {
    fn default() -> Self {
        Self {
            name: None,
            max_severity: DEFAULT_EXEMPTION_SEVERITY.to_string(),
            reason: DEFAULT_EXEMPTION_REASON.to_string(),
        }
    }
}
