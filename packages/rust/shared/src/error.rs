//! Error types for keydoc.
//!
//! Library crates use [`KeydocError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all unrecoverable keydoc failures.
///
/// Recoverable scan conditions are not errors; they are reported as
/// [`ScanDiagnostic`](crate::ScanDiagnostic) values instead.
#[derive(Debug, thiserror::Error)]
pub enum KeydocError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// A configured source file could not be read. Aborts the whole run.
    #[error("cannot read source file {path:?}: {source}")]
    InputRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Filesystem I/O error outside of source scanning (config, output).
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, KeydocError>;

impl KeydocError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a read failure on a configured source file.
    pub fn input_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::InputRead {
            path: path.into(),
            source,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = KeydocError::config("unknown field `sourcez`");
        assert_eq!(err.to_string(), "config error: unknown field `sourcez`");

        let err = KeydocError::input_read(
            "src/config/config_net.cpp",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        let msg = err.to_string();
        assert!(msg.contains("config_net.cpp"));
        assert!(msg.contains("no such file"));
    }
}
