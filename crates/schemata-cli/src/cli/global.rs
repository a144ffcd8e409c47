//! Global arguments shared by every mode (run, list, build-only).
//!
//! Declared here and flattened into [`super::Cli`] so that `-v`, `-q`, etc.
//! are accepted anywhere on the command line.

use clap::Args;
use std::path::{Path, PathBuf};

/// Global arguments for all modes.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Increase logging verbosity.
    ///
    /// Pass once for INFO (`-v`), twice for DEBUG (`-vv`), three times for
    /// TRACE (`-vvv`).  `--verbose` is also forwarded to the executor.
    /// Conflicts with `--quiet`.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv); forwarded to the executor",
        long_help = "Increase logging verbosity:
    (none)  - Only warnings and errors
    -v      - Info level (progress messages)
    -vv     - Debug level (detailed diagnostics)
    -vvv    - Trace level (very verbose)
The executor also receives --verbose."
    )]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(
        short = 'q',
        long = "quiet",
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Disable ANSI colour codes.
    ///
    /// Automatically honoured when `NO_COLOR` is set in the environment
    /// (see <https://no-color.org>).
    #[arg(
        long = "no-color",
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Configuration file path.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    /// Root of the schematic collection project.
    #[arg(
        long = "project-root",
        value_name = "DIR",
        env = "SCHEMATA_PROJECT_ROOT",
        help = "Collection project root (default: current directory)"
    )]
    pub project_root: Option<PathBuf>,
}

impl GlobalArgs {
    /// Resolve the project root against the invocation directory.
    pub fn resolve_project_root(&self, invocation_dir: &Path) -> PathBuf {
        match &self.project_root {
            Some(root) => invocation_dir.join(root),
            None => invocation_dir.to_path_buf(),
        }
    }
}
