pub mod common;
pub mod generation;
pub mod layout;
pub mod scaffold_set;
pub mod template;
pub mod watch;

use super::error::DomainError;

pub use common::RelativePath;
pub use generation::{GenerationArtifact, GenerationCommand, GenerationPlan, GeneratorSettings};
pub use layout::ProjectLayout;
pub use scaffold_set::{DirectoryToCreate, FileToWrite, FsEntry, ScaffoldFileSet};
pub use template::{DomainTemplate, RenderContext};
pub use watch::{ChangeKind, SourceFilter, WatchConfig, WatchState};
