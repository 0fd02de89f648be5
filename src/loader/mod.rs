//! Binding of looked-up values onto records.

mod binder;
mod builder;
mod env;
mod error;
mod field;
mod file;
mod source;

pub use binder::{tracing_log, Bind, Binding, Loader, LogFn, DEFAULT_PREFIX};
pub use builder::LoaderBuilder;
pub use env::EnvLookup;
pub use error::SourceError;
pub use field::{upper_snake_case, Field};
pub use file::FileLookup;
pub use source::{Layered, Lookup};
