use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::binder::{tracing_log, LogFn, DEFAULT_PREFIX};
use super::env::EnvLookup;
use super::file::FileLookup;
use super::source::{Layered, Lookup};
use super::Loader;
use crate::Error;

/// A lookup source in the loading pipeline.
enum SourceSpec {
    Env,
    File { path: PathBuf, required: bool },
    Custom(Box<dyn Lookup>),
}

impl fmt::Debug for SourceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env => f.write_str("Env"),
            Self::File { path, required } => f
                .debug_struct("File")
                .field("path", path)
                .field("required", required)
                .finish(),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// Builder for a [`Loader`] reading from several layered sources.
///
/// Sources are consulted in reverse registration order, so later sources
/// override earlier ones. A builder without any source reads the process
/// environment.
///
/// ## Example
///
/// ```no_run
/// use dragon_env::{bind_fields, Loader};
///
/// #[derive(Default)]
/// struct MyConfig {
///     name: String,
///     port: u16,
/// }
///
/// bind_fields!(MyConfig { name, port });
///
/// // defaults file -> environment overrides -> local file overrides env
/// let loader = Loader::builder()
///     .prefix("MYAPP_")
///     .with_file("config/default.toml", true)
///     .with_env()
///     .with_file("config/local.toml", false)
///     .build()?;
///
/// let mut config = MyConfig::default();
/// loader.load(&mut config)?;
/// # Ok::<(), dragon_env::Error>(())
/// ```
#[must_use = "builders do nothing until .build() is called"]
pub struct LoaderBuilder {
    prefix: String,
    sources: Vec<SourceSpec>,
    log: Option<LogFn>,
}

impl Default for LoaderBuilder {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            sources: Vec::new(),
            log: Some(tracing_log()),
        }
    }
}

impl LoaderBuilder {
    /// Sets the prefix prepended to every external name.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Adds the process environment as a source.
    pub fn with_env(mut self) -> Self {
        self.sources.push(SourceSpec::Env);
        self
    }

    /// Adds a TOML lookup file, see [`FileLookup`].
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    /// Optional files that are missing are silently skipped.
    pub fn with_file(mut self, path: impl AsRef<Path>, required: bool) -> Self {
        self.sources.push(SourceSpec::File {
            path: path.as_ref().to_path_buf(),
            required,
        });
        self
    }

    /// Adds an arbitrary lookup as a source.
    pub fn with_lookup(mut self, lookup: impl Lookup + 'static) -> Self {
        self.sources.push(SourceSpec::Custom(Box::new(lookup)));
        self
    }

    /// Sets the sink receiving one message per assigned field.
    pub fn log<F>(mut self, log: F) -> Self
    where
        F: Fn(fmt::Arguments<'_>) + Send + Sync + 'static,
    {
        self.log = Some(Arc::new(log));
        self
    }

    /// Disables logging of assigned fields.
    pub fn without_log(mut self) -> Self {
        self.log = None;
        self
    }

    /// Opens every source and builds the loader.
    pub fn build(self) -> Result<Loader, Error> {
        let mut layered = Layered::new();

        for source in self.sources {
            match source {
                SourceSpec::Env => layered.push(EnvLookup),
                SourceSpec::File { path, required } => {
                    layered.push(FileLookup::open(&path, required)?);
                }
                SourceSpec::Custom(lookup) => layered.push_boxed(lookup),
            }
        }

        if layered.is_empty() {
            layered.push(EnvLookup);
        }

        Ok(Loader::with_lookup(self.prefix, layered, self.log))
    }
}

impl fmt::Debug for LoaderBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderBuilder")
            .field("prefix", &self.prefix)
            .field("sources", &self.sources)
            .field("log", &self.log.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::SourceError;
    use std::collections::HashMap;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    #[derive(Debug, Default)]
    struct Service {
        host: String,
        port: u16,
        peers: Vec<String>,
    }

    crate::bind_fields!(Service { host, port, peers });

    fn overrides(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_file_then_lookup_override() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "SVC_HOST = \"file-host\"").unwrap();
        writeln!(file, "SVC_PORT = 8080").unwrap();
        writeln!(file, "SVC_PEERS = [\"a\", \"b\"]").unwrap();

        let loader = Loader::builder()
            .prefix("SVC_")
            .with_file(file.path(), true)
            .with_lookup(overrides(&[("SVC_HOST", "override-host")]))
            .without_log()
            .build()
            .unwrap();
        let mut service = Service::default();

        loader.load(&mut service).unwrap();

        assert_eq!(loader.prefix(), "SVC_");
        assert_eq!(service.host, "override-host");
        assert_eq!(service.port, 8080);
        assert_eq!(service.peers, vec!["a", "b"]);
    }

    #[test]
    fn test_required_file_missing_fails_build() {
        let result = Loader::builder()
            .with_file("/nonexistent/path/lookup.toml", true)
            .build();

        assert!(matches!(
            result,
            Err(Error::Source(SourceError::FileNotFound(_)))
        ));
    }

    #[test]
    fn test_optional_file_missing_is_skipped() {
        let loader = Loader::builder()
            .with_file("/nonexistent/path/lookup.toml", false)
            .with_lookup(overrides(&[("APP_PORT", "81")]))
            .without_log()
            .build()
            .unwrap();
        let mut service = Service::default();

        loader.load(&mut service).unwrap();

        assert_eq!(loader.prefix(), DEFAULT_PREFIX);
        assert_eq!(service.port, 81);
    }

    #[test]
    fn test_custom_log_sink() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&lines);
        let loader = Loader::builder()
            .with_lookup(overrides(&[("APP_HOST", "h")]))
            .log(move |args| sink.lock().unwrap().push(args.to_string()))
            .build()
            .unwrap();

        loader.load(&mut Service::default()).unwrap();

        assert_eq!(*lines.lock().unwrap(), vec!["set host with $APP_HOST=\"h\""]);
    }
}
