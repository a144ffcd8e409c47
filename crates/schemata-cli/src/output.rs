//! Output management and formatting.

use std::io;

use console::Term;
use owo_colors::OwoColorize;

use schemata_core::domain::{BuildTree, SchematicEntry};

use crate::cli::GlobalArgs;
use crate::config::AppConfig;

/// Placeholder for manifest entries without a description.
pub const NO_DESCRIPTION: &str = "(no description)";

/// Manages CLI output based on configuration.
pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        Self {
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color,
            term: Term::stdout(),
        }
    }

    /// Whether coloured output is allowed; error rendering follows this too.
    pub fn color_enabled(&self) -> bool {
        !self.no_color
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Indented listing of a build directory.
    pub fn tree(&self, tree: &BuildTree) -> io::Result<()> {
        for line in tree_lines(tree) {
            self.print(&line)?;
        }
        Ok(())
    }

    /// One `  - name: description` line per schematic.
    pub fn schematics(&self, entries: &[SchematicEntry]) -> io::Result<()> {
        for entry in entries {
            self.print(&schematic_line(entry))?;
        }
        Ok(())
    }
}

fn tree_lines(tree: &BuildTree) -> Vec<String> {
    tree.entries
        .iter()
        .map(|entry| {
            let icon = if entry.is_dir { "\u{1f4c1}" } else { "\u{1f4c4}" }; // 📁 📄
            format!("{}{} {}", "  ".repeat(entry.depth + 1), icon, entry.name)
        })
        .collect()
}

fn schematic_line(entry: &SchematicEntry) -> String {
    format!(
        "  - {}: {}",
        entry.name,
        entry.description.as_deref().unwrap_or(NO_DESCRIPTION)
    )
}

// ── tests ─────────────────────────────────────────────────────────────────────
