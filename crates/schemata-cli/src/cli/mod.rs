//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! and help text.  No business logic lives here.
//!
//! Schematic options are open-ended (`--name=foo`, `--path=src/app`, ...), so
//! raw arguments go through [`partition_args`] first: unknown `--key=value`
//! pairs become forwarded options and everything else is left to clap.

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use schemata_core::domain::ForwardedArg;

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "schemata",
    bin_name = "schemata",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Build a schematic collection and run one of its schematics",
    long_about = "schemata packages a schematic collection into its build \
                  directory and runs a schematic through the external executor. \
                  Any --key=value option it does not recognise is forwarded to \
                  the schematic.",
    after_help = "EXAMPLES:\n\
        \x20 schemata my-full-schematic --name=test --dry-run\n\
        \x20 schemata component --no-build --output=../app --name=header\n\
        \x20 schemata --list\n\
        \x20 schemata --build-only -v",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Flags shared by every mode.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Schematic to run.
    #[arg(
        value_name = "SCHEMATIC",
        required_unless_present_any = ["list", "build_only"],
        help = "Name of the schematic to run"
    )]
    pub name: Option<String>,

    /// List the collection's schematics instead of running one.
    #[arg(
        long = "list",
        conflicts_with_all = ["name", "build_only"],
        help = "List available schematics"
    )]
    pub list: bool,

    /// Passed through to the executor.
    #[arg(long = "dry-run", help = "Report changes without writing files")]
    pub dry_run: bool,

    /// Passed through to the executor.
    #[arg(long = "force", help = "Overwrite existing files")]
    pub force: bool,

    /// Working directory of the executor.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output directory (default: <project root>/output)"
    )]
    pub output: Option<PathBuf>,

    /// Run against the existing build directory.
    #[arg(
        long = "no-build",
        conflicts_with = "build_only",
        help = "Skip rebuilding the collection"
    )]
    pub no_build: bool,

    /// Package the collection and stop.
    #[arg(
        long = "build-only",
        conflicts_with = "name",
        help = "Build the collection without running a schematic"
    )]
    pub build_only: bool,
}

// ── Argument partitioning ─────────────────────────────────────────────────────

/// Raw arguments split between clap and the executor.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PartitionedArgs {
    /// Arguments for [`Cli`], including the binary name.
    pub clap_args: Vec<OsString>,
    /// Arguments for the executor, in encounter order.
    pub forwarded: Vec<ForwardedArg>,
}

enum Route {
    Clap,
    Forward(ForwardedArg),
    Both(ForwardedArg),
    Rest,
}

/// Split raw process arguments (binary name first).
///
/// - `--key=value` with an unknown `key` is forwarded as a schematic option;
///   the value is everything after the first `=`.
/// - `--dry-run`, `--force`, `--verbose` and `-v...` go to both sides.
/// - `--` ends partitioning; the rest goes to clap untouched.
pub fn partition_args<I, T>(args: I) -> PartitionedArgs
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let known = known_long_flags();
    let mut args = args.into_iter().map(Into::into);
    let mut out = PartitionedArgs::default();

    out.clap_args.extend(args.next());

    while let Some(arg) = args.next() {
        match route(&arg, &known) {
            Route::Clap => out.clap_args.push(arg),
            Route::Forward(fwd) => out.forwarded.push(fwd),
            Route::Both(fwd) => {
                out.forwarded.push(fwd);
                out.clap_args.push(arg);
            }
            Route::Rest => {
                out.clap_args.push(arg);
                out.clap_args.extend(args.by_ref());
            }
        }
    }
    out
}

fn route(arg: &OsString, known: &HashSet<String>) -> Route {
    let Some(text) = arg.to_str() else {
        return Route::Clap;
    };

    if text == "--" {
        return Route::Rest;
    }

    if let Some(long) = text.strip_prefix("--") {
        if let Some((key, value)) = long.split_once('=') {
            if !key.is_empty() && !known.contains(key) {
                return Route::Forward(ForwardedArg::option(key, value));
            }
            return Route::Clap;
        }
        return match long {
            "dry-run" => Route::Both(ForwardedArg::DryRun),
            "force" => Route::Both(ForwardedArg::Force),
            "verbose" => Route::Both(ForwardedArg::Verbose),
            _ => Route::Clap,
        };
    }

    if let Some(shorts) = text.strip_prefix('-') {
        if !shorts.is_empty() && shorts.chars().all(|c| c == 'v') {
            return Route::Both(ForwardedArg::Verbose);
        }
    }

    Route::Clap
}

/// Long names clap understands.
fn known_long_flags() -> HashSet<String> {
    Cli::command()
        .get_arguments()
        .filter_map(|arg| arg.get_long())
        .map(str::to_owned)
        .chain(["help".to_owned(), "version".to_owned()])
        .collect()
}

// ── tests ─────────────────────────────────────────────────────────────────────
