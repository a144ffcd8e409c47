//! # schemata CLI
//!
//! Packages a schematic collection and runs its schematics through the
//! external executor.
//!
//! ## Startup sequence
//!
//! 1. Split raw arguments into clap's share and the executor's share.
//! 2. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 3. Initialise the tracing subscriber (logging).
//! 4. Capture the invocation directory and resolve the project root.
//! 5. Load configuration (files + env + defaults).
//! 6. Build the [`OutputManager`]; from here `[output] no_color` also
//!    applies to error messages.
//! 7. Dispatch to list, build-only or run.
//! 8. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code   | Meaning                                   |
//! |--------|-------------------------------------------|
//! |  0     | Success, `--help`, `--version`            |
//! |  1     | Any failure                               |
//! |  N     | The executor exited with status N         |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use tracing::{debug, info, instrument};

use schemata_core::domain::ForwardedArg;

use crate::{
    cli::{Cli, partition_args},
    commands::{Context, run::RunArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    logging::{LogSettings, init_logging},
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Load .env before anything else, including tracing init.  A missing
    // .env is not an error.
    let _ = dotenvy::dotenv();

    // ── 1. Partition + 2. Parse ───────────────────────────────────────────
    let args = partition_args(std::env::args_os());
    let cli = match Cli::try_parse_from(&args.clap_args) {
        Ok(cli) => cli,
        Err(e) => {
            // clap renders help/version to stdout and errors to stderr.
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    // ── 3. Initialise tracing ─────────────────────────────────────────────
    // Runs before config is loaded so config loading can log; the log ANSI
    // switch therefore follows `--no-color` / `NO_COLOR` only.
    let log_settings = LogSettings::from_args(&cli.global, std::io::stderr().is_terminal());
    if let Err(e) = init_logging(log_settings) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        forwarded = args.forwarded.len(),
        "CLI started"
    );

    let verbose = cli.global.verbose > 0;
    // Until config is loaded only the flag decides.
    let color = !cli.global.no_color;

    // ── 4. Resolve directories ────────────────────────────────────────────
    let invocation_dir =
        match std::env::current_dir().with_cli_context(|| "Failed to read the current directory") {
            Ok(dir) => dir,
            Err(e) => return handle_error(e, verbose, color),
        };
    let project_root = cli.global.resolve_project_root(&invocation_dir);

    // ── 5. Load configuration ─────────────────────────────────────────────
    let config = match AppConfig::load(&project_root, cli.global.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => return handle_error(CliError::config(e), verbose, color),
    };

    // ── 6. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);
    let color = output.color_enabled();
    let ctx = Context::new(invocation_dir, project_root, config);

    // ── 7. Dispatch + 8. Error handling ───────────────────────────────────
    match run(cli, args.forwarded, &ctx, &output) {
        Ok(()) => {
            info!("schemata completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose, color),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(
    cli: Cli,
    forwarded: Vec<ForwardedArg>,
    ctx: &Context,
    output: &OutputManager,
) -> CliResult<()> {
    if cli.list {
        return commands::list::execute(ctx, output);
    }
    if cli.build_only {
        return commands::build::execute(ctx, output);
    }

    let name = cli.name.ok_or_else(|| CliError::InvalidInput {
        message: "a schematic name is required".into(),
        source: None,
    })?;
    let args = RunArgs {
        name,
        forwarded,
        output: cli.output,
        no_build: cli.no_build,
    };
    commands::run::execute(args, ctx, output)
}

/// Translate a `CliError` into a user message and an appropriate exit code.
///
/// This is the single place where structured errors become human-readable
/// output and OS exit codes.
fn handle_error(err: CliError, verbose: bool, color: bool) -> ExitCode {
    err.log();

    // Colour is disabled when stderr is not a TTY (same logic as logging.rs).
    let msg = if color && std::io::stderr().is_terminal() {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────
