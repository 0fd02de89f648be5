use std::env::VarError;

use tracing::warn;

use super::source::Lookup;

/// Looks names up in the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvLookup;

impl Lookup for EnvLookup {
    fn lookup(&self, name: &str) -> Option<String> {
        match std::env::var(name) {
            Ok(value) => Some(value),
            Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(_)) => {
                warn!(name, "ignoring environment variable with a non-UTF-8 value");
                None
            }
        }
    }
}
