//! Command handlers.
//!
//! Each handler translates parsed arguments into calls on a core service
//! and displays results.  No business logic lives here.

pub mod build;
pub mod list;
pub mod run;

use std::path::{Path, PathBuf};

use tracing::debug;

use schemata_adapters::{CommandCompiler, LocalWorkspace, NoopCompiler, SystemProcessRunner};
use schemata_core::{
    application::{CatalogService, Compiler, PackagingService, RunnerService},
    domain::CollectionLayout,
};

use crate::config::AppConfig;

/// Resolved process-level inputs, captured once at startup.
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory the binary was invoked from.
    pub invocation_dir: PathBuf,
    /// Root of the collection project.
    pub project_root: PathBuf,
    pub config: AppConfig,
}

impl Context {
    pub fn new(invocation_dir: PathBuf, project_root: PathBuf, config: AppConfig) -> Self {
        debug!(
            invocation_dir = %invocation_dir.display(),
            project_root = %project_root.display(),
            "Context resolved"
        );
        Self {
            invocation_dir,
            project_root,
            config,
        }
    }

    pub fn layout(&self) -> CollectionLayout {
        self.config.to_layout(&self.project_root)
    }

    /// `--output` resolved against the invocation directory, or the
    /// configured default under the project root.
    pub fn output_dir(&self, flag: Option<&Path>) -> PathBuf {
        match flag {
            Some(path) => self.invocation_dir.join(path),
            None => self.project_root.join(&self.config.executor.output_dir),
        }
    }

    pub fn packager(&self) -> PackagingService {
        PackagingService::new(Box::new(LocalWorkspace::new()), self.compiler(), self.layout())
    }

    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(Box::new(LocalWorkspace::new()), self.layout())
    }

    pub fn runner(&self) -> RunnerService {
        RunnerService::new(
            self.packager(),
            Box::new(SystemProcessRunner::new()),
            self.config.executor(),
        )
    }

    fn compiler(&self) -> Box<dyn Compiler> {
        let cfg = &self.config.compiler;
        if cfg.enabled {
            Box::new(CommandCompiler::new(cfg.program.clone(), cfg.args.clone()))
        } else {
            Box::new(NoopCompiler)
        }
    }
}
