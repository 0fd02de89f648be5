//! Populates typed records from environment-style name/value lookups.
//!
//! A record lists its bound fields with [`bind_fields!`]. A [`Loader`] walks
//! those fields, derives each field's external name from the loader prefix
//! and the field identifier, looks the name up and converts the string into
//! the field's type (see [`coerce`]).
//!
//! ```no_run
//! use dragon_env::bind_fields;
//!
//! #[derive(Default)]
//! struct Config {
//!     host: String,
//!     port: u16,
//! }
//!
//! bind_fields!(Config { host, port });
//!
//! // Reads APP_HOST and APP_PORT.
//! let mut config = Config::default();
//! dragon_env::load(&mut config)?;
//! # Ok::<(), dragon_env::Error>(())
//! ```

pub mod coerce;
pub mod loader;
mod error;
mod macros;

pub use coerce::{
    assign, Assign, BinaryUnmarshaler, BoxError, CoerceError, Fresh, Json, Kind, Setter,
    TextUnmarshaler,
};
pub use error::Error;
pub use loader::{
    tracing_log, Bind, Binding, EnvLookup, Field, FileLookup, Layered, Loader, LoaderBuilder,
    LogFn, Lookup, SourceError, DEFAULT_PREFIX,
};

/// Populates `target` from the process environment using the `APP_` prefix,
/// logging every assigned field through `tracing`.
pub fn load<T: Bind + ?Sized>(target: &mut T) -> Result<(), Error> {
    Loader::default().load(target)
}
