//! Process runner using `std::process`.

use std::path::Path;
use std::process::Command;

use tracing::{debug, instrument};

use schemata_core::{
    application::{ApplicationError, ProcessRunner},
    domain::CommandLine,
    error::SchemataResult,
};

/// Spawns the command with inherited stdio and waits for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcessRunner {
    #[instrument(skip_all, fields(command = %command))]
    fn run(&self, command: &CommandLine, working_dir: &Path) -> SchemataResult<Option<i32>> {
        debug!(cwd = %working_dir.display(), "Spawning");

        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(working_dir)
            .status()
            .map_err(|e| ApplicationError::SpawnFailed {
                command: command.to_string(),
                reason: e.to_string(),
            })?;

        debug!(status = ?status.code(), "Child exited");
        Ok(status.code())
    }
}
