use super::DomainError;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A filesystem path guaranteed to be relative and free of `..` segments.
///
/// Invariant: Never absolute, never escapes its root. Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.is_absolute() || path.components().any(|c| matches!(c, Component::ParentDir)) {
            Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            })
        } else {
            Ok(Self(path))
        }
    }

    /// First path component, e.g. `api` for `api/article.go`.
    pub fn top_level(&self) -> Option<&str> {
        self.0.components().next().and_then(|c| c.as_os_str().to_str())
    }

    /// Whether this path is a single file name directly under the root.
    pub fn is_root_file(&self) -> bool {
        self.0.components().count() == 1
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_absolute_and_parent_paths() {
        assert!(RelativePath::try_new("/etc/passwd").is_err());
        assert!(RelativePath::try_new("../outside.go").is_err());
        assert!(RelativePath::try_new("api/../../x").is_err());
    }

    #[test]
    fn top_level_and_root_file() {
        let nested = RelativePath::try_new("repo/db/article.go").unwrap();
        assert_eq!(nested.top_level(), Some("repo"));
        assert!(!nested.is_root_file());

        let root = RelativePath::try_new("errors.go").unwrap();
        assert!(root.is_root_file());
    }
}
