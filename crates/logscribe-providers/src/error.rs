use std::fmt;
use std::path::PathBuf;

/// Result type for logscribe-providers operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the providers layer
#[derive(Debug)]
pub enum Error {
    /// IO operation on a specific path failed
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON parsing failed
    Json(serde_json::Error),

    /// Walkdir error
    WalkDir(walkdir::Error),

    /// Path resolution or reference validation failed
    Core(logscribe_core::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io { path, source } => write!(f, "IO error on {}: {}", path.display(), source),
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::WalkDir(err) => write!(f, "Directory traversal error: {}", err),
            Error::Core(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            Error::Json(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::Core(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDir(err)
    }
}

impl From<logscribe_core::Error> for Error {
    fn from(err: logscribe_core::Error) -> Self {
        Error::Core(err)
    }
}
