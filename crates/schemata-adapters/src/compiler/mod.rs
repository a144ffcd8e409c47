//! Compiler adapters.

mod command;

pub use command::{CommandCompiler, NoopCompiler};
