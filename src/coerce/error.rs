use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// Boxed error returned by user-provided conversion capabilities.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure to convert a string into a destination value.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoerceError {
    #[error("invalid integer: {0}")]
    Int(#[from] ParseIntError),

    #[error("invalid float: {0}")]
    Float(#[from] ParseFloatError),

    #[error("float out of range: {0:?}")]
    FloatRange(String),

    #[error("invalid boolean: {0:?}")]
    Bool(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Custom(#[source] BoxError),

    #[error("no string conversion available for {0}")]
    Unsupported(&'static str),
}
