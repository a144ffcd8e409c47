//! Runner Service - runs one schematic through the external executor.
//!
//! `Run -> Build -> EnsureOutputDir -> Spawn`. Every transition happens at
//! most once; there are no retries. [`RunnerService::prepare`] covers
//! everything up to the spawn so callers can report the build before the
//! child takes over the terminal.

use std::path::PathBuf;

use tracing::{info, instrument, warn};

use crate::{
    application::{PackagingService, ports::ProcessRunner},
    domain::{BuildReport, CommandLine, Executor, RunPlan, SchematicRequest},
    error::SchemataResult,
};

/// Everything needed to spawn the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRun {
    pub command: CommandLine,
    pub working_dir: PathBuf,
    /// Present when the plan asked for a rebuild.
    pub build: Option<BuildReport>,
}

/// Result of the executor run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub command: CommandLine,
    /// `None` when the child was killed by a signal.
    pub exit_code: Option<i32>,
}

impl RunOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Schematic runner.
pub struct RunnerService {
    packager: PackagingService,
    process: Box<dyn ProcessRunner>,
    executor: Executor,
}

impl RunnerService {
    pub fn new(
        packager: PackagingService,
        process: Box<dyn ProcessRunner>,
        executor: Executor,
    ) -> Self {
        Self {
            packager,
            process,
            executor,
        }
    }

    /// Rebuild (if planned), create the output directory, and resolve the
    /// command line.
    #[instrument(skip_all, fields(schematic = %request.name()))]
    pub fn prepare(
        &self,
        request: &SchematicRequest,
        plan: &RunPlan,
    ) -> SchemataResult<PreparedRun> {
        let build = if plan.rebuild {
            Some(self.packager.package()?)
        } else {
            info!("Skipping rebuild");
            None
        };

        let workspace = self.packager.workspace();
        if !workspace.exists(&plan.output_dir) {
            workspace.create_dir_all(&plan.output_dir)?;
        }

        let command = CommandLine::for_schematic(
            &self.executor,
            self.packager.layout().build_dir(),
            request,
        );

        Ok(PreparedRun {
            command,
            working_dir: plan.output_dir.clone(),
            build,
        })
    }

    /// Spawn the executor and wait for it.
    #[instrument(skip_all, fields(command = %prepared.command))]
    pub fn execute(&self, prepared: &PreparedRun) -> SchemataResult<RunOutcome> {
        info!(working_dir = %prepared.working_dir.display(), "Running executor");
        let exit_code = self
            .process
            .run(&prepared.command, &prepared.working_dir)?;

        let outcome = RunOutcome {
            command: prepared.command.clone(),
            exit_code,
        };
        if outcome.success() {
            info!("Executor finished");
        } else {
            warn!(exit_code = ?exit_code, "Executor failed");
        }
        Ok(outcome)
    }

    /// [`Self::prepare`] followed by [`Self::execute`].
    pub fn run(&self, request: &SchematicRequest, plan: &RunPlan) -> SchemataResult<RunOutcome> {
        let prepared = self.prepare(request, plan)?;
        self.execute(&prepared)
    }
}
