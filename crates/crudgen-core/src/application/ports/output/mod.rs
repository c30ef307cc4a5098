//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `crudgen-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use crate::domain::{
    ChangeKind, DomainTemplate, GenerationCommand, GeneratorKind, RenderContext,
    ScaffoldFileSet, SourceFilter, entities::generation::normalize_target,
};
use crate::error::{CrudgenError, CrudgenResult};

/// Port for filesystem operations.
///
/// Implemented by:
/// - `crudgen_adapters::filesystem::LocalFilesystem` (production)
/// - `crudgen_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Every call is a suspension point.
#[async_trait]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    async fn create_dir_all(&self, path: &Path) -> CrudgenResult<()>;

    /// Write content to a file, replacing it if present.
    async fn write_file(&self, path: &Path, content: &str) -> CrudgenResult<()>;

    async fn read_to_string(&self, path: &Path) -> CrudgenResult<String>;

    /// Check if path exists.
    async fn exists(&self, path: &Path) -> bool;

    /// Remove a single file.
    async fn remove_file(&self, path: &Path) -> CrudgenResult<()>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `crudgen_adapters::renderer::SimpleRenderer` (variable substitution)
pub trait TemplateRenderer: Send + Sync {
    /// Render a domain template into a file set rooted at `output_root`.
    fn render(
        &self,
        template: &DomainTemplate,
        context: &RenderContext,
        output_root: &Path,
    ) -> CrudgenResult<ScaffoldFileSet>;
}

// ── Processes ────────────────────────────────────────────────────────────────

/// Exit status and captured streams of a finished subprocess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success() -> Self {
        Self {
            code: Some(0),
            ..Self::default()
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stderr: stderr.into(),
            ..Self::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Port for running external generators.
///
/// Implemented by:
/// - `crudgen_adapters::process::TokioProcessRunner` (production)
/// - `crudgen_adapters::process::ScriptedRunner` (testing)
///
/// A process that starts and exits non-zero is `Ok`; only a failure to
/// start it at all is an error (`GeneratorUnavailable`).
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, command: &GenerationCommand) -> CrudgenResult<ProcessOutput>;
}

// ── Change notification ──────────────────────────────────────────────────────

/// Which subscription an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatchChannel {
    Sources,
    Config,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub channel: WatchChannel,
    pub kind: ChangeKind,
    /// Relative to the subscription root when the path lies under it.
    pub path: PathBuf,
}

/// What to watch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionRequest {
    /// Recursively watch `paths` (relative to `root`) for source changes.
    Sources {
        root: PathBuf,
        paths: Vec<String>,
        filter: SourceFilter,
    },
    /// Watch a single file (relative to `root`).
    ConfigFile { root: PathBuf, file: PathBuf },
}

impl SubscriptionRequest {
    pub fn channel(&self) -> WatchChannel {
        match self {
            Self::Sources { .. } => WatchChannel::Sources,
            Self::ConfigFile { .. } => WatchChannel::Config,
        }
    }

    pub fn root(&self) -> &Path {
        match self {
            Self::Sources { root, .. } | Self::ConfigFile { root, .. } => root,
        }
    }

    /// Whether an event at `path` (relative to the root) belongs to this
    /// subscription.
    pub fn accepts(&self, path: &Path, kind: ChangeKind) -> bool {
        match self {
            Self::Sources { paths, filter, .. } => {
                filter.accepts(path, kind)
                    && paths
                        .iter()
                        .any(|p| path.starts_with(normalize_target(p)))
            }
            Self::ConfigFile { file, .. } => {
                Path::new(&normalize_target(&file.to_string_lossy())) == path
            }
        }
    }
}

/// A live subscription. Events stop once it is closed.
pub trait Subscription: Send {
    fn id(&self) -> &str;

    fn close(self: Box<Self>);
}

/// Port for filesystem change notification.
///
/// Implemented by:
/// - `crudgen_adapters::watcher::NotifyChangeSource` (production)
/// - `crudgen_adapters::watcher::ScriptedChangeSource` (testing)
pub trait ChangeSource: Send + Sync {
    fn subscribe(
        &self,
        request: SubscriptionRequest,
        events: UnboundedSender<ChangeEvent>,
    ) -> CrudgenResult<Box<dyn Subscription>>;
}

// ── Watch feedback ───────────────────────────────────────────────────────────

/// Progress callbacks for a running watch session.
///
/// The CLI renders these; tests usually pass [`SilentReporter`].
pub trait WatchReporter: Send + Sync {
    fn watching(&self, _kind: GeneratorKind, _paths: &[String]) {}

    fn change_detected(&self, _path: &Path) {}

    fn config_changed(&self, _kind: GeneratorKind, _paths: &[String]) {}

    fn generated(&self, _kind: GeneratorKind, _output: &str) {}

    fn generation_failed(&self, _target: &str, _error: &CrudgenError) {}

    fn stopped(&self, _kind: GeneratorKind) {}
}

/// A reporter that shows nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl WatchReporter for SilentReporter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_requests_match_nested_files_only() {
        let request = SubscriptionRequest::Sources {
            root: PathBuf::from("/p"),
            paths: vec!["./domains/a/models".into()],
            filter: SourceFilter::default(),
        };
        assert!(request.accepts(Path::new("domains/a/models/a.go"), ChangeKind::Changed));
        assert!(request.accepts(Path::new("domains/a/models/sub/b.go"), ChangeKind::Changed));
        assert!(!request.accepts(Path::new("domains/b/models/b.go"), ChangeKind::Changed));
        assert!(!request.accepts(Path::new("domains/a/models/a.ts"), ChangeKind::Changed));
    }

    #[test]
    fn config_requests_match_the_file() {
        let request = SubscriptionRequest::ConfigFile {
            root: PathBuf::from("/p"),
            file: PathBuf::from("package.json"),
        };
        assert_eq!(request.channel(), WatchChannel::Config);
        assert!(request.accepts(Path::new("package.json"), ChangeKind::Changed));
        assert!(!request.accepts(Path::new("go.mod"), ChangeKind::Changed));
    }
}
