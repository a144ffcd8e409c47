//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not document
//! rules. Document errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while packaging or running.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The external compiler exited unsuccessfully.
    #[error("Compilation failed: `{command}` {}", describe_status(.status))]
    CompileFailed { command: String, status: Option<i32> },

    /// An external program could not be started.
    #[error("Failed to start `{command}`: {reason}")]
    SpawnFailed { command: String, reason: String },

    /// The collection manifest does not exist.
    #[error("Collection manifest not found at {path}")]
    ManifestNotFound { path: PathBuf },
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".into(),
    }
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::CompileFailed { command, .. } => vec![
                "Fix the compiler errors reported above".into(),
                format!("Re-run the compiler by hand: {}", command),
            ],
            Self::SpawnFailed { command, .. } => vec![
                format!("Ensure `{}` is installed and in your PATH", command),
                "Configure another program in schemata.toml".into(),
            ],
            Self::ManifestNotFound { path } => vec![
                format!("Expected a manifest at {}", path.display()),
                "Run from the collection's project root or pass --project-root".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::CompileFailed { .. } => ErrorCategory::Build,
            Self::SpawnFailed { .. } => ErrorCategory::Internal,
            Self::ManifestNotFound { .. } => ErrorCategory::NotFound,
        }
    }
}
