//! Error types for timelinegen.
//!
//! Library crates use [`TimelineError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all timelinegen operations.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    /// Input table could not be opened or is not well-formed.
    #[error("read error at {path:?}: {message}")]
    Read { path: PathBuf, message: String },

    /// Output document could not be read back or rewritten.
    #[error("write error at {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Output document has no `BEGIN`/`END TIMELINE CONTENT` region.
    ///
    /// Only raised in strict mode; otherwise the splice is a logged no-op.
    #[error("no timeline region found in {path:?}")]
    NoMarkerFound { path: PathBuf },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TimelineError>;

impl TimelineError {
    /// Create a read error for the given input path.
    pub fn read(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Read {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` raised while touching the output document.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
