//! Unified error type.

use std::fmt;

/// A boxed, thread-safe error value carried from a failing handler to the
/// router's error stage.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type returned by routebook's fallible operations.
///
/// Failures inside a request are not `Error`s: they travel as [`BoxError`]
/// through [`Next::fail`](crate::Next::fail) and become responses. This type
/// surfaces setup and infrastructure failures: a route pattern the router
/// cannot store, a method name it does not know, or socket I/O.
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Route {
        path: String,
        source: matchit::InsertError,
    },
    UnknownMethod(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Route { path, source } => write!(f, "invalid route `{path}`: {source}"),
            Self::UnknownMethod(m) => write!(f, "unknown HTTP method `{m}`"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Route { source, .. } => Some(source),
            Self::UnknownMethod(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
