//! Policy loading error types.

/// Policy loading error.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("Policy file not found: {0}")]
    NotFound(String),

    #[error("Failed to read policy file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML policy {path}: {source}")]
    ParseYaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to parse JSON policy {path}: {source}")]
    ParseJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse TOML policy {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
