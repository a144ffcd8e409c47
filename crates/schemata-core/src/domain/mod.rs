//! Core domain layer for schemata.
//!
//! Pure types and rules with no I/O: the project layout contract, the
//! manifest and descriptor documents, run requests, and the packaging
//! pipeline vocabulary. Reading and writing happens through the ports in
//! `crate::application`.

pub mod build;
pub mod descriptor;
pub mod error;
pub mod invocation;
pub mod layout;
pub mod manifest;

pub use build::{BuildReport, BuildState, BuildStep, BuildTree, TreeEntry};
pub use descriptor::{BuildDescriptor, ProjectDescriptor};
pub use error::{DomainError, ErrorCategory};
pub use invocation::{CommandLine, Executor, ForwardedArg, RunPlan, SchematicRequest};
pub use layout::CollectionLayout;
pub use manifest::{CollectionManifest, SchematicEntry};
