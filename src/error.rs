//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.

use std::path::PathBuf;

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<PathBuf>,
    },

    /// Chapter text does not exist in the store
    #[error("Chapter not found: {path}")]
    NotFound {
        /// Store path that was requested.
        path: String,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Document tree operation error
    #[error("Document error: {0}")]
    Document(String),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a not-found error for a store path
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Whether this error means the requested chapter is absent
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Io { source, .. } => matches!(source.kind(), std::io::ErrorKind::NotFound),
            _ => false,
        }
    }
}
