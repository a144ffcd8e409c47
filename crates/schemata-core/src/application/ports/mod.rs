//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `schemata-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Workspace`: File operations
//!   - `Compiler`: External source compilation
//!   - `ProcessRunner`: External executor invocation
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Compiler, DirEntry, ProcessRunner, Workspace};

#[cfg(test)]
pub use output::{MockCompiler, MockProcessRunner, MockWorkspace};
