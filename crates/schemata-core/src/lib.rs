//! schemata core - hexagonal architecture implementation
//!
//! This crate provides the domain and application layers for packaging a
//! schematic collection into a build directory and running one of its
//! schematics through the external executor.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          schemata-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (Packaging, Runner, Catalog services)   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Driven: Workspace, Compiler, Process)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    schemata-adapters (Infrastructure)   │
//! │ (LocalWorkspace, CommandCompiler, etc)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (CollectionLayout, Manifest, Request)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use schemata_core::prelude::*;
//!
//! # fn adapters() -> (Box<dyn Workspace>, Box<dyn Compiler>) { unimplemented!() }
//! let (workspace, compiler) = adapters();
//! let layout = CollectionLayout::new("/path/to/collection");
//!
//! let packager = PackagingService::new(workspace, compiler, layout);
//! let report = packager.package()?;
//! println!("{} files in {}", report.tree.file_count(), report.build_dir.display());
//! # Ok::<(), SchemataError>(())
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CatalogService, PackagingService, PreparedRun, RunOutcome, RunnerService,
        ports::{Compiler, DirEntry, ProcessRunner, Workspace},
    };
    pub use crate::domain::{
        BuildReport, BuildState, BuildStep, BuildTree, CollectionLayout, CollectionManifest,
        CommandLine, Executor, ForwardedArg, RunPlan, SchematicEntry, SchematicRequest,
        TreeEntry,
    };
    pub use crate::error::{ErrorCategory, SchemataError, SchemataResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
