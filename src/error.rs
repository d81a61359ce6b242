//! Crate error type
//!
//! The simulation itself is total and never fails. Errors only come from the
//! edges: reading tuning files and talking to persistent storage. Callers are
//! expected to log them and fall back to defaults.

use std::fmt;

/// Top-level error enum
#[derive(Debug)]
pub enum Error {
    /// Filesystem access failed
    Io {
        /// Path or storage key that was being accessed
        context: String,
        source: std::io::Error,
    },

    /// Stored or supplied JSON could not be (de)serialized
    Json(serde_json::Error),

    /// A tuning value is outside its usable range
    InvalidTuning {
        /// Name of the field (for logging)
        field: &'static str,
        /// Human-readable description of the constraint
        reason: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io { context, source } => write!(f, "I/O error on {context}: {source}"),
            Error::Json(e) => write!(f, "JSON error: {e}"),
            Error::InvalidTuning { field, reason } => {
                write!(f, "invalid tuning value `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            Error::Json(e) => Some(e),
            Error::InvalidTuning { .. } => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

/// Convenience alias
pub type Result<T> = std::result::Result<T, Error>;
