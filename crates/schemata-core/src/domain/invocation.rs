//! Schematic run requests and the external command line they become.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::DomainError;

/// One argument forwarded to the external executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardedArg {
    /// `--dry-run`: the executor reports changes without writing them.
    DryRun,
    /// `--force`: the executor overwrites existing files.
    Force,
    /// `--verbose`
    Verbose,
    /// `--<key>=<value>` schematic option.
    Option { key: String, value: String },
}

impl ForwardedArg {
    /// Build an option argument.
    pub fn option(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Option {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Render as a single command-line argument.
    pub fn to_arg(&self) -> String {
        match self {
            Self::DryRun => "--dry-run".into(),
            Self::Force => "--force".into(),
            Self::Verbose => "--verbose".into(),
            Self::Option { key, value } => format!("--{key}={value}"),
        }
    }

    fn is_flag(&self) -> bool {
        !matches!(self, Self::Option { .. })
    }
}

/// A validated request to run one schematic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchematicRequest {
    name: String,
    forwarded: Vec<ForwardedArg>,
}

impl SchematicRequest {
    /// Validate `name` and start an empty request.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        validate_schematic_name(&name)?;
        Ok(Self {
            name,
            forwarded: Vec::new(),
        })
    }

    /// Append forwarded arguments in encounter order. Flags are kept at
    /// their first occurrence only.
    pub fn with_forwarded(mut self, args: impl IntoIterator<Item = ForwardedArg>) -> Self {
        for arg in args {
            self.push(arg);
        }
        self
    }

    pub fn push(&mut self, arg: ForwardedArg) {
        if arg.is_flag() && self.forwarded.contains(&arg) {
            return;
        }
        self.forwarded.push(arg);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn forwarded(&self) -> &[ForwardedArg] {
        &self.forwarded
    }

    pub fn is_dry_run(&self) -> bool {
        self.forwarded.contains(&ForwardedArg::DryRun)
    }
}

fn validate_schematic_name(name: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidSchematicName {
        name: name.into(),
        reason: reason.into(),
    };

    if name.trim().is_empty() {
        return Err(invalid("name cannot be empty"));
    }
    if name.contains(':') {
        return Err(invalid("name cannot contain ':'"));
    }
    if name.starts_with('-') {
        return Err(invalid("name cannot start with '-'"));
    }
    Ok(())
}

/// The external code-generation tool: program plus leading arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executor {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for Executor {
    /// `npx schematics`
    fn default() -> Self {
        Self {
            program: "npx".into(),
            args: vec!["schematics".into()],
        }
    }
}

/// A fully resolved external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `<executor> <collection>:<name> <forwarded...>`
    pub fn for_schematic(
        executor: &Executor,
        collection: &Path,
        request: &SchematicRequest,
    ) -> Self {
        let mut args = executor.args.clone();
        args.push(format!("{}:{}", collection.display(), request.name()));
        args.extend(request.forwarded().iter().map(ForwardedArg::to_arg));
        Self::new(executor.program.clone(), args)
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// How a run is carried out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    /// Rebuild the collection before spawning the executor.
    pub rebuild: bool,
    /// Working directory of the executor; created if missing.
    pub output_dir: PathBuf,
}
