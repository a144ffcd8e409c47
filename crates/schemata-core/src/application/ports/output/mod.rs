//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `schemata-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::CommandLine;
use crate::error::SchemataResult;

/// One child of a directory, as returned by [`Workspace::read_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `schemata_adapters::workspace::LocalWorkspace` (production)
/// - `schemata_adapters::workspace::MemoryWorkspace` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Workspace: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> SchemataResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> SchemataResult<()>;

    /// Read a UTF-8 text file.
    fn read_to_string(&self, path: &Path) -> SchemataResult<String>;

    /// Write content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> SchemataResult<()>;

    /// Copy one file byte for byte. The destination's parent must exist.
    fn copy_file(&self, from: &Path, to: &Path) -> SchemataResult<()>;

    /// Copy a directory tree, creating `to` and every subdirectory.
    fn copy_dir_all(&self, from: &Path, to: &Path) -> SchemataResult<()>;

    /// Direct children of a directory, sorted by name.
    fn read_dir(&self, path: &Path) -> SchemataResult<Vec<DirEntry>>;
}

/// Port for the external source compiler.
///
/// Implemented by:
/// - `schemata_adapters::compiler::CommandCompiler` (runs e.g. `tsc`)
/// - `schemata_adapters::compiler::NoopCompiler` (precompiled sources)
#[cfg_attr(test, mockall::automock)]
pub trait Compiler: Send + Sync {
    /// Human-readable command, for logs and diagnostics.
    fn describe(&self) -> String;

    /// Compile the whole project. A failed compilation is
    /// `ApplicationError::CompileFailed`.
    fn compile(&self, project_root: &Path) -> SchemataResult<()>;
}

/// Port for spawning the external executor.
///
/// Implemented by:
/// - `schemata_adapters::process::SystemProcessRunner`
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner: Send + Sync {
    /// Run `command` in `working_dir` with inherited stdio and wait for it.
    ///
    /// Returns the exit code, or `None` when the child was killed by a
    /// signal. Failing to start is an error.
    fn run(&self, command: &CommandLine, working_dir: &Path) -> SchemataResult<Option<i32>>;
}
