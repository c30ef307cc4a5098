//! Application layer for crudgen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService, Generator, WatchSupervisor)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    ConfigPatcher, GenerationReport, Generator, ManifestReader, ModuleResolver, ScaffoldReport,
    ScaffoldService, WatchSupervisor,
};

// Re-export port traits (for adapter implementation)
pub use ports::{ChangeSource, Filesystem, ProcessRunner, TemplateRenderer, WatchReporter};

pub use error::ApplicationError;
