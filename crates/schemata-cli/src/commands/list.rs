//! `schemata --list`: print the collection's schematics.
//!
//! Reads the source manifest only; nothing is built, spawned or created.

use tracing::instrument;

use crate::{commands::Context, error::CliResult, output::OutputManager};

#[instrument(skip_all)]
pub fn execute(ctx: &Context, output: &OutputManager) -> CliResult<()> {
    let entries = ctx.catalog().list()?;

    output.header("Available schematics:")?;
    if entries.is_empty() {
        output.warning("The manifest declares no schematics")?;
    }
    output.schematics(&entries)?;
    Ok(())
}
