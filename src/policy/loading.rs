//! Policy loading functions.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::error::PolicyError;
use super::types::Policy;

impl Policy {
    /// Load a policy from a file.
    ///
    /// `.json` and `.toml` files use their own parsers; anything else is
    /// read as YAML.
    pub fn from_file(path: &Path) -> Result<Self, PolicyError> {
        if !path.exists() {
            return Err(PolicyError::NotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path).map_err(|e| PolicyError::ReadFile {
            path: path.display().to_string(),
            source: e,
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "json" => serde_json::from_str(&content).map_err(|e| PolicyError::ParseJson {
                path: path.display().to_string(),
                source: e,
            }),
            "toml" => toml::from_str(&content).map_err(|e| PolicyError::ParseToml {
                path: path.display().to_string(),
                source: e,
            }),
            _ => serde_yaml::from_str(&content).map_err(|e| PolicyError::ParseYaml {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }

    /// Load a policy, falling back to [`Policy::built_in`] when the file is
    /// missing or cannot be parsed.
    pub fn load_or_built_in(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(policy) => {
                debug!(path = %path.display(), version = %policy.version, "Loaded policy");
                policy
            }
            Err(e) => {
                warn!(error = %e, "Using built-in default policy");
                Self::built_in()
            }
        }
    }
}
