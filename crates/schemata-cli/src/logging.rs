//! Tracing subscriber initialisation.
//!
//! Only the CLI crate installs a subscriber; `schemata-core` and
//! `schemata-adapters` only emit events. Output goes to stderr so it never
//! interleaves with the executor's stdout.
//!
//! `-q` maps to ERROR, no flag to WARN, `-v` to INFO, `-vv` to DEBUG and
//! `-vvv` or more to TRACE. A set `RUST_LOG` replaces the whole filter.
//!
//! The subscriber is installed before configuration is read, so the
//! `[output] no_color` setting cannot reach it.

use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::GlobalArgs;

/// Crates whose events pass the verbosity filter.
const TARGETS: [&str; 3] = ["schemata", "schemata_core", "schemata_adapters"];

/// What the subscriber needs from the command line and the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LevelFilter,
    pub ansi: bool,
}

impl LogSettings {
    pub fn from_args(args: &GlobalArgs, stderr_is_tty: bool) -> Self {
        let level = match (args.quiet, args.verbose) {
            (true, _) => LevelFilter::ERROR,
            (false, 0) => LevelFilter::WARN,
            (false, 1) => LevelFilter::INFO,
            (false, 2) => LevelFilter::DEBUG,
            (false, _) => LevelFilter::TRACE,
        };
        Self {
            level,
            ansi: stderr_is_tty && !args.no_color,
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(self.level)))
    }
}

/// Install the global subscriber. Fails if one is already set.
pub fn init_logging(settings: LogSettings) -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(settings.ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(settings.filter())
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}

fn directives(level: LevelFilter) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
