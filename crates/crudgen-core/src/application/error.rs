//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`; services
//! translate them into these variants once they know which file was involved.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{DomainError, GeneratorKind};
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Malformed or missing required input.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Target domain directory is already present.
    #[error("Domain already exists at {path}")]
    AlreadyExists { path: PathBuf },

    /// A manifest section or array the operation relies on is absent.
    #[error("Missing '{key}' in {file}")]
    MissingConfig { file: PathBuf, key: String },

    /// A delimited block could not be located in a patched file.
    #[error("Expected structure not found in {file}: {detail}")]
    StructureNotFound { file: PathBuf, detail: String },

    /// A configuration file could not be parsed.
    #[error("Malformed configuration in {file}: {reason}")]
    MalformedConfig { file: PathBuf, reason: String },

    /// The external generator exited non-zero.
    #[error("{kind} generation failed for '{target}'{}: {stderr}", exit_suffix(.code))]
    GenerationFailed {
        kind: GeneratorKind,
        target: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The external generator could not be started at all.
    #[error("Generator '{program}' could not be started: {reason}")]
    GeneratorUnavailable { program: String, reason: String },

    /// `go.mod` lacks a module directive.
    #[error("No module name found in {path}")]
    ModuleNameNotFound { path: PathBuf },

    /// A step failed after the domain directory was created.
    #[error("Domain scaffold at {path} is incomplete: {cause}")]
    PartialScaffold { path: PathBuf, cause: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The change notification backend failed.
    #[error("Watch failed: {reason}")]
    WatchFailed { reason: String },
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" (exit code {code})"),
        None => " (terminated by signal)".to_string(),
    }
}

impl ApplicationError {
    /// Attach the file being read or patched to a domain rule violation.
    pub fn from_domain(file: impl Into<PathBuf>, err: DomainError) -> Self {
        let file = file.into();
        match err {
            DomainError::MissingSection { key } | DomainError::NotAStringArray { key } => {
                Self::MissingConfig { file, key }
            }
            DomainError::BlockNotFound { .. } => Self::StructureNotFound {
                file,
                detail: err.to_string(),
            },
            DomainError::MalformedJson(reason) => Self::MalformedConfig { file, reason },
            DomainError::MissingModuleDirective => Self::ModuleNameNotFound { path: file },
            other => Self::ValidationFailed(other.to_string()),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ValidationFailed(_) => vec![
                "Domain names use lowercase letters, digits, '_' or '-'".into(),
                "Example: crudgen new-domain blog_post".into(),
            ],
            Self::AlreadyExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different domain name".into(),
                "Or remove the directory if it is left over from a failed run".into(),
            ],
            Self::MissingConfig { file, key } => vec![
                format!("Add \"{}\" to {}", key, file.display()),
                "Each generator section needs a \"paths\" array".into(),
            ],
            Self::StructureNotFound { file, .. } => vec![
                format!("Check the import block in {}", file.display()),
                "The block must open with `import (` and close with `)` on its own line".into(),
            ],
            Self::MalformedConfig { file, .. } => {
                vec![format!("Fix the syntax of {}", file.display())]
            }
            Self::GenerationFailed { kind, .. } => vec![
                format!("The {} generator reported the error above", kind),
                "Fix the source files and run the command again".into(),
            ],
            Self::GeneratorUnavailable { program, .. } => vec![
                format!("Install '{}' and make sure it is on PATH", program),
                "Or point crudgen at it via the generators section of crudgen.toml".into(),
            ],
            Self::ModuleNameNotFound { path } => vec![
                format!("{} must contain a `module <path>` line", path.display()),
                "Run crudgen from the project root or pass --project-dir".into(),
            ],
            Self::PartialScaffold { path, .. } => vec![
                format!("Remove {} before retrying", path.display()),
                "Nothing was rolled back".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::WatchFailed { .. } => vec![
                "Check that the watched directories exist".into(),
                "Raise the inotify watch limit if many directories are watched".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationFailed(_) | Self::AlreadyExists { .. } => ErrorCategory::Validation,
            Self::MissingConfig { .. }
            | Self::StructureNotFound { .. }
            | Self::MalformedConfig { .. }
            | Self::ModuleNameNotFound { .. } => ErrorCategory::Configuration,
            Self::GenerationFailed { .. } | Self::GeneratorUnavailable { .. } => {
                ErrorCategory::Generation
            }
            Self::PartialScaffold { .. }
            | Self::FilesystemError { .. }
            | Self::WatchFailed { .. } => ErrorCategory::Internal,
        }
    }
}
