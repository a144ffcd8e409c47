//! Application layer for schemata.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (packaging, running, listing)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer; document rules live
//! in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{CatalogService, PackagingService, PreparedRun, RunOutcome, RunnerService};

// Re-export port traits (for adapter implementation)
pub use ports::{Compiler, DirEntry, ProcessRunner, Workspace};

pub use error::ApplicationError;
