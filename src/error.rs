use crate::coerce::CoerceError;
use crate::loader::SourceError;
use thiserror::Error;

/// Top-level error type for the dragon-env library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The load target was absent.
    ///
    /// A target of the wrong kind cannot reach the loader at all, since
    /// loading requires [`Bind`](crate::Bind); both conditions share this error.
    #[error("must be a non-nil pointer to a struct")]
    StructPointer,

    #[error("failed to set {field} from ${name}: {source}")]
    Conversion {
        field: &'static str,
        name: String,
        #[source]
        source: CoerceError,
    },

    #[error("lookup source error: {0}")]
    Source(#[from] SourceError),
}
