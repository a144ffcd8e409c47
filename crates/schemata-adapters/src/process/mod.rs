//! Process runner adapters.

mod system;

pub use system::SystemProcessRunner;
