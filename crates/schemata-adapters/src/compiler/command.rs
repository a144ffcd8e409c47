//! Compilers backed by an external command.

use std::path::Path;
use std::process::Command;

use tracing::{debug, info, instrument};

use schemata_core::{
    application::{ApplicationError, Compiler},
    error::SchemataResult,
};

/// Runs a compiler command (e.g. `tsc -p tsconfig.json`) in the project
/// root with inherited stdio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCompiler {
    program: String,
    args: Vec<String>,
}

impl CommandCompiler {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `tsc -p tsconfig.json`
    pub fn typescript() -> Self {
        Self::new("tsc", vec!["-p".into(), "tsconfig.json".into()])
    }
}

impl Compiler for CommandCompiler {
    fn describe(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[instrument(skip(self), fields(command = %self.describe()))]
    fn compile(&self, project_root: &Path) -> SchemataResult<()> {
        debug!(cwd = %project_root.display(), "Spawning compiler");

        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(project_root)
            .status()
            .map_err(|e| ApplicationError::SpawnFailed {
                command: self.describe(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(ApplicationError::CompileFailed {
                command: self.describe(),
                status: status.code(),
            }
            .into());
        }

        info!("Compilation finished");
        Ok(())
    }
}

/// Skips compilation entirely.
///
/// No factory code reaches the build directory, so the result only holds the
/// manifest, descriptor, schemas and verbatim files. Useful for checking the
/// packaging layout; the executor cannot run such a build.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCompiler;

impl Compiler for NoopCompiler {
    fn describe(&self) -> String {
        "(no compiler)".into()
    }

    fn compile(&self, _project_root: &Path) -> SchemataResult<()> {
        debug!("Compilation disabled");
        Ok(())
    }
}
