//! `schemata --build-only`: package the collection and report the result.

use tracing::{info, instrument};

use schemata_core::domain::BuildReport;

use crate::{commands::Context, error::CliResult, output::OutputManager};

#[instrument(skip_all)]
pub fn execute(ctx: &Context, output: &OutputManager) -> CliResult<()> {
    let report = ctx.packager().package()?;
    info!(steps = report.state.completed.len(), "Build finished");
    show_report(&report, output)
}

/// Print the build tree followed by a one-line summary.
pub fn show_report(report: &BuildReport, output: &OutputManager) -> CliResult<()> {
    output.header(&format!("Build output ({}):", report.build_dir.display()))?;
    output.tree(&report.tree)?;
    output.success(&format!(
        "Build completed: {} files, {} directories",
        report.tree.file_count(),
        report.tree.directory_count()
    ))?;
    Ok(())
}
