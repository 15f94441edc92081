//! Error types shared by the preference store and its host adapters.

use std::path::Path;

use thiserror::Error;

/// Convenience result type for preference operations.
pub type PrefsResult<T> = Result<T, PrefsError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures surfaced by preference operations.
///
/// Missing keys and unparseable stored values are never errors; they resolve to the caller's
/// default value before reaching this type.
pub enum PrefsError {
    /// A filesystem operation failed for environmental reasons.
    #[error("failed to {operation} {path}: {message}")]
    Io {
        /// Short verb phrase naming the failed operation.
        operation: &'static str,
        /// Virtual or host path the operation targeted.
        path: String,
        /// Underlying error text.
        message: String,
    },
    /// The key cannot name a single entry in the namespace.
    #[error("invalid preference key {0:?}")]
    InvalidKey(String),
    /// The host preference store rejected or failed the operation.
    #[error("preference store error: {0}")]
    Store(String),
    /// Configuration could not be read or parsed.
    #[error("preference config error: {0}")]
    Config(String),
    /// The host capability is not available on this target.
    #[error("unsupported on this target: {0}")]
    Unsupported(String),
}

impl PrefsError {
    /// Builds an [`PrefsError::Io`] from any displayable error.
    pub fn io(
        operation: &'static str,
        path: impl Into<String>,
        err: impl std::fmt::Display,
    ) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Builds an [`PrefsError::Io`] for a host filesystem path.
    pub fn host_io(operation: &'static str, path: &Path, err: &std::io::Error) -> Self {
        Self::io(operation, path.display().to_string(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display_names_operation_and_path() {
        let err = PrefsError::io("write", "/idbfs/Co/App/volume", "disk full");
        assert_eq!(err.to_string(), "failed to write /idbfs/Co/App/volume: disk full");
    }

    #[test]
    fn invalid_key_display_quotes_key() {
        assert_eq!(
            PrefsError::InvalidKey("a/b".to_string()).to_string(),
            "invalid preference key \"a/b\""
        );
    }
}
