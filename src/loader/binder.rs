use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use super::env::EnvLookup;
use super::field::Field;
use super::source::Lookup;
use super::LoaderBuilder;
use crate::coerce::{self, Assign};
use crate::Error;

/// Prefix used by [`Loader::default`] and [`crate::load`].
pub const DEFAULT_PREFIX: &str = "APP_";

/// Value logged in place of a secret field's value.
const SECRET_MASK: &str = "***";

/// Receives one message per assigned field.
pub type LogFn = Arc<dyn Fn(fmt::Arguments<'_>) + Send + Sync>;

/// A log sink forwarding to `tracing` at info level.
pub fn tracing_log() -> LogFn {
    Arc::new(|args: fmt::Arguments<'_>| tracing::info!("{}", args))
}

/// A record whose fields can be populated by a [`Loader`].
///
/// Implementations are normally generated with [`bind_fields!`](crate::bind_fields).
pub trait Bind {
    fn bind(&mut self, binding: &Binding<'_>) -> Result<(), Error>;
}

impl<T: Bind + ?Sized> Bind for Box<T> {
    fn bind(&mut self, binding: &Binding<'_>) -> Result<(), Error> {
        (**self).bind(binding)
    }
}

/// An absent record is allocated with its default value before binding.
impl<T: Bind + Default> Bind for Option<T> {
    fn bind(&mut self, binding: &Binding<'_>) -> Result<(), Error> {
        self.get_or_insert_with(T::default).bind(binding)
    }
}

/// Populates records from a lookup source.
///
/// A loader never changes after construction. Every call to [`load`](Self::load)
/// carries its own prefix through the recursion, so one loader may serve
/// concurrent loads.
///
/// ## Example
///
/// ```
/// use std::collections::HashMap;
/// use dragon_env::{bind_fields, Loader};
///
/// #[derive(Debug, Default)]
/// struct Config {
///     host: String,
///     port: u16,
///     password: String,
/// }
///
/// bind_fields!(Config {
///     host,
///     port,
///     password = ",secret",
/// });
///
/// let source: HashMap<String, String> = [
///     ("APP_HOST", "127.0.0.1"),
///     ("APP_PORT", "8080"),
///     ("APP_PASSWORD", "hunter2"),
/// ]
/// .into_iter()
/// .map(|(k, v)| (k.to_string(), v.to_string()))
/// .collect();
///
/// let loader = Loader::with_lookup("APP_", source, None);
/// let mut config = Config::default();
/// loader.load(&mut config)?;
///
/// assert_eq!(config.host, "127.0.0.1");
/// assert_eq!(config.port, 8080);
/// # Ok::<(), dragon_env::Error>(())
/// ```
#[derive(Clone)]
pub struct Loader {
    prefix: String,
    lookup: Arc<dyn Lookup>,
    log: Option<LogFn>,
}

impl Loader {
    /// Creates a loader reading the process environment and logging through `tracing`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::with_lookup(prefix, EnvLookup, Some(tracing_log()))
    }

    /// Creates a loader using the given lookup. Passing `None` disables logging.
    pub fn with_lookup(
        prefix: impl Into<String>,
        lookup: impl Lookup + 'static,
        log: Option<LogFn>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            lookup: Arc::new(lookup),
            log,
        }
    }

    /// Creates a builder for layering lookup sources.
    pub fn builder() -> LoaderBuilder {
        LoaderBuilder::default()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Populates `target` with the values found by the lookup.
    ///
    /// Fields are visited in declaration order. Nested records are loaded
    /// completely before the next sibling, with their names extended by the
    /// nested prefix for that record only. A field whose name is not found
    /// keeps its value.
    ///
    /// The first conversion failure stops the load. Fields assigned before it
    /// keep their new values.
    pub fn load<T: Bind + ?Sized>(&self, target: &mut T) -> Result<(), Error> {
        let binding = Binding {
            loader: self,
            prefix: Cow::Borrowed(&self.prefix),
        };
        target.bind(&binding)
    }

    /// Like [`load`](Self::load), failing with [`Error::StructPointer`] when
    /// there is no target.
    pub fn load_ptr<T: Bind + ?Sized>(&self, target: Option<&mut T>) -> Result<(), Error> {
        let target = target.ok_or(Error::StructPointer)?;
        self.load(target)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl fmt::Debug for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loader")
            .field("prefix", &self.prefix)
            .field("log", &self.log.is_some())
            .finish_non_exhaustive()
    }
}

/// The state of one record being loaded: the loader and the active prefix.
pub struct Binding<'a> {
    loader: &'a Loader,
    prefix: Cow<'a, str>,
}

impl Binding<'_> {
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Loads a nested record under this binding's prefix extended by the
    /// field's nested prefix.
    pub fn nested<T: Bind + ?Sized>(&self, field: &Field, target: &mut T) -> Result<(), Error> {
        if field.prefix().is_empty() {
            return target.bind(self);
        }

        let child = Binding {
            loader: self.loader,
            prefix: Cow::Owned(format!("{}{}", self.prefix, field.prefix())),
        };
        debug!(field = field.ident(), prefix = %child.prefix, "loading nested record");
        target.bind(&child)
    }

    /// Looks up a leaf field and assigns the value when it is set.
    pub fn leaf<T: Assign + ?Sized>(&self, field: &Field, target: &mut T) -> Result<(), Error> {
        if field.is_skipped() {
            return Ok(());
        }

        let name = format!("{}{}", self.prefix, field.name());
        let Some(value) = self.loader.lookup.lookup(&name) else {
            trace!(name = %name, "not set");
            return Ok(());
        };

        if let Some(log) = &self.loader.log {
            let shown = if field.is_secret() {
                SECRET_MASK
            } else {
                value.as_str()
            };
            log(format_args!("set {} with ${}=\"{}\"", field.ident(), name, shown));
        }

        coerce::assign(target, &value).map_err(|source| Error::Conversion {
            field: field.ident(),
            name,
            source,
        })
    }
}
