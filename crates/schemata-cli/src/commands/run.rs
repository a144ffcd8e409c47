//! `schemata <SCHEMATIC>`: build the collection and run one schematic.
//!
//! Dispatch sequence:
//! 1. Validate the schematic name and collect forwarded arguments
//! 2. Rebuild the collection unless `--no-build`
//! 3. Create the output directory
//! 4. Spawn the executor there with inherited stdio
//! 5. Mirror the executor's exit status

use std::path::PathBuf;

use tracing::{debug, instrument};

use schemata_core::{
    domain::{ForwardedArg, RunPlan, SchematicRequest},
    error::SchemataError,
};

use crate::{
    commands::{Context, build::show_report},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Everything the run handler needs from the command line.
#[derive(Debug, Clone)]
pub struct RunArgs {
    pub name: String,
    /// Executor arguments in encounter order.
    pub forwarded: Vec<ForwardedArg>,
    pub output: Option<PathBuf>,
    pub no_build: bool,
}

#[instrument(skip_all, fields(schematic = %args.name))]
pub fn execute(args: RunArgs, ctx: &Context, output: &OutputManager) -> CliResult<()> {
    let request = SchematicRequest::new(&args.name)
        .map_err(SchemataError::from)?
        .with_forwarded(args.forwarded);

    let plan = RunPlan {
        rebuild: !args.no_build,
        output_dir: ctx.output_dir(args.output.as_deref()),
    };
    debug!(?plan, "Run plan");

    let layout = ctx.layout();
    if args.no_build && !layout.build_dir().exists() {
        output.warning(&format!(
            "--no-build given but {} does not exist",
            layout.build_dir().display()
        ))?;
    }

    let runner = ctx.runner();
    let prepared = runner.prepare(&request, &plan)?;

    if let Some(report) = &prepared.build {
        show_report(report, output)?;
    }
    if request.is_dry_run() {
        output.info("Dry run: the executor will not write any files")?;
    }
    output.info(&format!("Running: {}", prepared.command))?;
    output.info(&format!("Working directory: {}", prepared.working_dir.display()))?;

    let outcome = runner.execute(&prepared)?;
    if !outcome.success() {
        return Err(CliError::SchematicFailed {
            name: request.name().to_string(),
            code: outcome.exit_code,
        });
    }

    output.success(&format!("Schematic '{}' completed", request.name()))?;
    Ok(())
}
