//! Infrastructure adapters for crudgen.
//!
//! This crate implements the ports defined in `crudgen_core::application::ports`.
//! Everything that touches the disk, spawns a process or listens for file
//! changes lives here, together with in-memory doubles for each port.

pub mod builtin_templates;
pub mod filesystem;
pub mod process;
pub mod renderer;
pub mod watcher;

// Re-export commonly used adapters
pub use builtin_templates::domain_template;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::{RecordedRun, ScriptedRunner, TokioProcessRunner};
pub use renderer::SimpleRenderer;
pub use watcher::{NotifyChangeSource, ScriptedChangeSource};
