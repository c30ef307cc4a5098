// ============================================================================
// domain/error.rs - DOMAIN RULE VIOLATIONS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (surfaced from several layers)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
///
/// Domain errors never carry file paths; the application layer attaches the
/// file that was being read or patched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Domain name cannot be empty")]
    EmptyDomainName,

    #[error("Invalid domain name '{name}': {reason}")]
    InvalidDomainName { name: String, reason: String },

    #[error("Unknown generator '{0}'")]
    UnknownGenerator(String),

    #[error("Duplicate path in scaffold: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path '{path}' is outside the domain layout")]
    PathOutsideLayout { path: String },

    #[error("Scaffold file set is empty")]
    EmptyFileSet,

    // ========================================================================
    // Structure Errors (the text being patched lacks an expected shape)
    // ========================================================================
    #[error("No line starting with '{start}' followed by a closing '{end}' line")]
    BlockNotFound { start: String, end: String },

    #[error("Missing '{key}' section")]
    MissingSection { key: String },

    #[error("'{key}' is not an array of strings")]
    NotAStringArray { key: String },

    #[error("Malformed JSON: {0}")]
    MalformedJson(String),

    #[error("No 'module' directive found")]
    MissingModuleDirective,
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyDomainName => vec![
                "Provide a domain name, e.g. `crudgen new-domain article`".into(),
            ],
            Self::InvalidDomainName { name, .. } => vec![
                format!("'{}' cannot be used as a domain name", name),
                "Use lowercase letters, digits, '_' or '-', starting with a letter".into(),
                "Examples: article, blog_post, user-role".into(),
            ],
            Self::UnknownGenerator(_) => vec!["Known generators: go2ts, orm-gen".into()],
            Self::BlockNotFound { start, end } => vec![
                format!("Expected a block opened by '{}' and closed by '{}'", start, end),
                "Restore the import block or add the import manually".into(),
            ],
            Self::MissingSection { key } | Self::NotAStringArray { key } => vec![
                format!("Add a \"{}\" object with a \"paths\" array", key),
                format!("Example: \"{}\": {{ \"paths\": [] }}", key),
            ],
            Self::MissingModuleDirective => vec![
                "go.mod must start with a `module <path>` line".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyDomainName | Self::InvalidDomainName { .. } | Self::UnknownGenerator(_) => {
                ErrorCategory::Validation
            }
            Self::BlockNotFound { .. }
            | Self::MissingSection { .. }
            | Self::NotAStringArray { .. }
            | Self::MalformedJson(_)
            | Self::MissingModuleDirective => ErrorCategory::Structure,
            _ => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Structure,
    Internal,
}
