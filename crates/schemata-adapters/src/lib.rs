//! Infrastructure adapters for schemata.
//!
//! This crate implements the ports defined in `schemata-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod compiler;
pub mod process;
pub mod workspace;

// Re-export commonly used adapters
pub use compiler::{CommandCompiler, NoopCompiler};
pub use process::SystemProcessRunner;
pub use workspace::{LocalWorkspace, MemoryWorkspace};
