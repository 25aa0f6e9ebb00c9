use thiserror::Error;

#[derive(Error, Debug)]
pub enum GateError {
    #[error("Failed to read file: {path}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON artifact: {path}")]
    JsonParseError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Path is not a directory: {0}")]
    NotADirectory(String),

    #[error("Failed to write file: {path}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GateError>;
