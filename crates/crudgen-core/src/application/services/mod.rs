//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a domain" or "watch and regenerate".

pub mod config_patcher;
pub mod generation_service;
pub mod manifest;
pub mod module_resolver;
pub mod scaffold_service;
pub mod watch_service;

pub use config_patcher::ConfigPatcher;
pub use generation_service::{GenerationReport, Generator};
pub use manifest::ManifestReader;
pub use module_resolver::ModuleResolver;
pub use scaffold_service::{ScaffoldReport, ScaffoldService};
pub use watch_service::WatchSupervisor;
