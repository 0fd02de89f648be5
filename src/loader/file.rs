//! File-based lookup source.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;

use toml::Value;
use tracing::debug;

use super::source::Lookup;
use super::SourceError;

/// A lookup backed by a flat TOML file of `NAME = value` pairs.
///
/// ```toml
/// APP_HOST = "127.0.0.1"
/// APP_PORT = 8080
/// APP_PEERS = ["a", "b"]
/// ```
///
/// Scalars are looked up in their plain textual form. Arrays and tables are
/// re-encoded as JSON, which is what structured fields decode.
#[derive(Debug, Clone, Default)]
pub struct FileLookup {
    values: HashMap<String, String>,
}

impl FileLookup {
    /// Loads a lookup file.
    ///
    /// If `required` is true, a missing file is an error. Optional files that
    /// are missing yield an empty lookup.
    pub fn open(path: impl AsRef<Path>, required: bool) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound && !required => {
                debug!(path = %path.display(), "optional lookup file not found");
                return Ok(Self::default());
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SourceError::FileNotFound(path.to_path_buf()));
            }
            Err(source) => {
                return Err(SourceError::ReadError {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let table: toml::Table =
            toml::from_str(&contents).map_err(|source| SourceError::ParseError {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_table(table)
    }

    pub fn from_table(table: toml::Table) -> Result<Self, SourceError> {
        let values = table
            .into_iter()
            .map(|(key, value)| {
                let text = value_to_string(value).map_err(|source| SourceError::EncodeError {
                    key: key.clone(),
                    source,
                })?;
                Ok((key, text))
            })
            .collect::<Result<_, SourceError>>()?;
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Lookup for FileLookup {
    fn lookup(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

fn value_to_string(value: Value) -> Result<String, serde_json::Error> {
    Ok(match value {
        Value::String(s) => s,
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Datetime(dt) => dt.to_string(),
        nested @ (Value::Array(_) | Value::Table(_)) => serde_json::to_string(&nested)?,
    })
}
