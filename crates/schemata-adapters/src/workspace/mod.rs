//! Workspace adapters.

mod local;
mod memory;

pub use local::LocalWorkspace;
pub use memory::MemoryWorkspace;
