use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("required lookup file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read lookup file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse lookup file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to encode value of '{key}' as JSON: {source}")]
    EncodeError {
        key: String,
        source: serde_json::Error,
    },
}
