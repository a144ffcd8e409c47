//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the
//! [`CollectionLayout`] and [`Executor`] built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `SCHEMATA_<SECTION>__<KEY>`, lists space separated
//! 3. `--config <FILE>` (must exist)
//! 4. `<project root>/schemata.toml`
//! 5. Global config file ([`AppConfig::config_path`])
//! 6. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use schemata_core::domain::{
    CollectionLayout, Executor,
    layout::{
        DEFAULT_BUILD_DIR, DEFAULT_DESCRIPTOR, DEFAULT_FILES_DIR_NAME, DEFAULT_MANIFEST,
        DEFAULT_PINNED_DEPENDENCIES, DEFAULT_SCHEMA_FILE_NAME, DEFAULT_SCHEMA_REF,
        DEFAULT_SOURCE_DIR,
    },
};

/// File name of the per-project configuration file.
pub const PROJECT_CONFIG_FILE: &str = "schemata.toml";

const ENV_PREFIX: &str = "SCHEMATA";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Collection layout.
    pub project: ProjectConfig,
    /// Source compiler.
    pub compiler: CompilerConfig,
    /// External schematic executor.
    pub executor: ExecutorConfig,
    /// Output settings.
    pub output: OutputConfig,
}

/// Paths are relative to the project root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub source_dir: PathBuf,
    pub build_dir: PathBuf,
    pub manifest: PathBuf,
    pub descriptor: PathBuf,
    pub schema_file_name: String,
    pub files_dir_name: String,
    pub schema_ref: String,
    pub pinned_dependencies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// `false` skips compilation; the build then carries no factory code.
    pub enabled: bool,
    pub program: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    pub program: String,
    pub args: Vec<String>,
    /// Default working directory of the executor, relative to the project root.
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            source_dir: DEFAULT_SOURCE_DIR.into(),
            build_dir: DEFAULT_BUILD_DIR.into(),
            manifest: DEFAULT_MANIFEST.into(),
            descriptor: DEFAULT_DESCRIPTOR.into(),
            schema_file_name: DEFAULT_SCHEMA_FILE_NAME.into(),
            files_dir_name: DEFAULT_FILES_DIR_NAME.into(),
            schema_ref: DEFAULT_SCHEMA_REF.into(),
            pinned_dependencies: DEFAULT_PINNED_DEPENDENCIES
                .iter()
                .map(|d| d.to_string())
                .collect(),
        }
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: "tsc".into(),
            args: vec!["-p".into(), "tsconfig.json".into()],
        }
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        let executor = Executor::default();
        Self {
            program: executor.program,
            args: executor.args,
            output_dir: "output".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration for the project at `project_root`.
    ///
    /// `config_file` is the path the user passed via `--config`; it must
    /// exist.  The global and project files are optional.
    pub fn load(project_root: &Path, config_file: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = Config::builder();

        if let Some(global) = Self::config_path() {
            debug!(path = %global.display(), "Global config candidate");
            builder = builder.add_source(File::from(global).required(false));
        }

        builder =
            builder.add_source(File::from(project_root.join(PROJECT_CONFIG_FILE)).required(false));

        if let Some(path) = config_file {
            debug!(path = %path.display(), "Explicit config file");
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(" ")
                    .with_list_parse_key("project.pinned_dependencies")
                    .with_list_parse_key("compiler.args")
                    .with_list_parse_key("executor.args")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration sources")?;

        settings
            .try_deserialize()
            .context("Invalid configuration values")
    }

    /// Path to the global configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness;
    /// `None` when no home directory can be determined.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "schemata", "schemata")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// Collection layout rooted at `project_root`.
    pub fn to_layout(&self, project_root: &Path) -> CollectionLayout {
        let p = &self.project;
        CollectionLayout::new(project_root)
            .with_source_dir(&p.source_dir)
            .with_build_dir(&p.build_dir)
            .with_manifest(&p.manifest)
            .with_descriptor(&p.descriptor)
            .with_schema_file_name(p.schema_file_name.clone())
            .with_files_dir_name(p.files_dir_name.clone())
            .with_schema_ref(p.schema_ref.clone())
            .with_pinned_dependencies(p.pinned_dependencies.iter().cloned())
    }

    pub fn executor(&self) -> Executor {
        Executor {
            program: self.executor.program.clone(),
            args: self.executor.args.clone(),
        }
    }
}
