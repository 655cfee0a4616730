//! Typed error handling for enumscope.
//!
//! Library consumers can match on [`AuditError`] to tell a cancelled pass
//! apart from a broken symbol dump or a failing symbol provider.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed error raised by an upstream symbol provider.
pub type ProviderFault = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for enumscope operations.
#[derive(Error, Debug)]
pub enum AuditError {
    /// The audit was set up without the inputs it needs.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Cancellation was observed at a project or controller checkpoint.
    #[error("Operation cancelled")]
    Cancelled,

    /// The symbol provider failed while answering a query.
    #[error("Symbol provider error: {message}")]
    Collaborator {
        message: String,
        #[source]
        source: ProviderFault,
    },

    /// A symbol dump could not be decoded.
    #[error("Symbol dump error in {path}: {message}")]
    Dump {
        path: PathBuf,
        message: String,
        /// Line number (1-indexed) if available
        line: Option<usize>,
        /// Column number (1-indexed) if available
        column: Option<usize>,
    },

    /// I/O error when reading dumps or configuration
    #[error("I/O error at {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration file errors
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl AuditError {
    /// Create an invalid-input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a provider error without an underlying cause.
    pub fn collaborator(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Collaborator {
            source: message.clone().into(),
            message,
        }
    }

    /// Wrap an error raised by a symbol provider.
    pub fn collaborator_fault(message: impl Into<String>, source: impl Into<ProviderFault>) -> Self {
        Self::Collaborator {
            message: message.into(),
            source: source.into(),
        }
    }

    /// Create a dump decoding error, keeping serde_json's location when it has one.
    pub fn dump(path: impl Into<PathBuf>, err: &serde_json::Error) -> Self {
        let (line, column) = if err.line() == 0 {
            (None, None)
        } else {
            (Some(err.line()), Some(err.column()))
        };
        Self::Dump {
            path: path.into(),
            message: err.to_string(),
            line,
            column,
        }
    }

    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Check if this error is recoverable (the caller can fall back and continue).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Check whether the pass was aborted by cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Get the path associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Dump { path, .. } => Some(path),
            Self::Io { path, .. } => Some(path),
            Self::Config { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Convenience type alias for enumscope results.
pub type AuditResult<T> = Result<T, AuditError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> AuditResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> AuditResult<T> {
        self.map_err(|e| AuditError::io(path, e))
    }
}
