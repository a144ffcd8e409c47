// ============================================================================
// domain/error.rs - DOCUMENT AND REQUEST ERRORS
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (services wrap them without consuming the source)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Document Errors
    // ========================================================================
    #[error("Invalid manifest {path}: {reason}")]
    InvalidManifest { path: PathBuf, reason: String },

    #[error("Invalid package descriptor {path}: {reason}")]
    InvalidDescriptor { path: PathBuf, reason: String },

    #[error("Package descriptor is missing required field '{field}'")]
    MissingDescriptorField { field: &'static str },

    #[error("Package descriptor does not declare pinned dependency '{name}'")]
    MissingPinnedDependency { name: String },

    // ========================================================================
    // Request Errors
    // ========================================================================
    #[error("Invalid schematic name '{name}': {reason}")]
    InvalidSchematicName { name: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidManifest { path, .. } => vec![
                format!("Check that {} is valid JSON", path.display()),
                "The manifest must be an object with a \"schematics\" map".into(),
            ],
            Self::InvalidDescriptor { path, .. } => vec![
                format!("Check that {} is valid JSON", path.display()),
            ],
            Self::MissingDescriptorField { field } => vec![
                format!("Add a \"{}\" field to package.json", field),
            ],
            Self::MissingPinnedDependency { name } => vec![
                format!("Add \"{}\" to the dependencies in package.json", name),
                "Or change project.pinned_dependencies in schemata.toml".into(),
            ],
            Self::InvalidSchematicName { .. } => vec![
                "Use the name of a schematic from the collection".into(),
                "List available schematics: schemata --list".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidSchematicName { .. } => ErrorCategory::Validation,
            Self::InvalidManifest { .. }
            | Self::InvalidDescriptor { .. }
            | Self::MissingDescriptorField { .. }
            | Self::MissingPinnedDependency { .. } => ErrorCategory::InvalidDocument,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    InvalidDocument,
}
