//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "package the collection" or "run a schematic".

pub mod catalog_service;
pub mod packaging_service;
pub mod runner_service;

pub use catalog_service::CatalogService;
pub use packaging_service::PackagingService;
pub use runner_service::{PreparedRun, RunOutcome, RunnerService};
