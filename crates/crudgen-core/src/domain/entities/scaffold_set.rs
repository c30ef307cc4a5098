use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::{entities::common::RelativePath, error::DomainError};

/// Top-level directories a domain scaffold may write into.
pub const DOMAIN_LAYOUT: &[&str] = &["api", "models", "repo", "service", "types", "views"];

/// Rendered scaffold ready for materialization.
///
/// This is the output of template rendering for one domain: an ordered list
/// of directories and files relative to `root`. It contains no business
/// logic, only data plus its own invariants (see [`ScaffoldFileSet::validate`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldFileSet {
    pub(crate) root: PathBuf,
    pub(crate) entries: Vec<FsEntry>,
}

impl ScaffoldFileSet {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
        }
    }

    pub fn add_file(&mut self, path: RelativePath, content: String) {
        self.entries.push(FsEntry::File(FileToWrite { path, content }));
    }

    pub fn add_directory(&mut self, path: RelativePath) {
        self.entries
            .push(FsEntry::Directory(DirectoryToCreate { path }));
    }

    pub fn with_file(mut self, path: RelativePath, content: impl Into<String>) -> Self {
        self.add_file(path, content.into());
        self
    }

    pub fn with_directory(mut self, path: RelativePath) -> Self {
        self.add_directory(path);
        self
    }

    /// Check the file-set invariants: non-empty, unique paths, and every path
    /// either a root-level file or inside one of [`DOMAIN_LAYOUT`].
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::EmptyFileSet);
        }

        let mut seen = HashSet::new();
        for entry in &self.entries {
            let path = entry.path();

            if !seen.insert(path) {
                return Err(DomainError::DuplicatePath {
                    path: path.to_string(),
                });
            }

            let in_layout = path
                .top_level()
                .is_some_and(|top| DOMAIN_LAYOUT.contains(&top));
            let root_file = matches!(entry, FsEntry::File(_)) && path.is_root_file();

            if !in_layout && !root_file {
                return Err(DomainError::PathOutsideLayout {
                    path: path.to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[FsEntry] {
        &self.entries
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::File(f) => Some(f),
            _ => None,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &DirectoryToCreate> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::Directory(d) => Some(d),
            _ => None,
        })
    }

    /// Look up a rendered file by its relative path.
    pub fn file(&self, path: impl AsRef<Path>) -> Option<&FileToWrite> {
        let path = path.as_ref();
        self.files().find(|f| f.path.as_path() == path)
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsEntry {
    File(FileToWrite),
    Directory(DirectoryToCreate),
}

impl FsEntry {
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileToWrite {
    pub path: RelativePath,
    pub content: String,
}

impl FileToWrite {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryToCreate {
    pub path: RelativePath,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(p: &str) -> RelativePath {
        RelativePath::try_new(p).unwrap()
    }

    #[test]
    fn empty_set_is_invalid() {
        let set = ScaffoldFileSet::new("domains/x");
        assert_eq!(set.validate(), Err(DomainError::EmptyFileSet));
    }

    #[test]
    fn duplicate_paths_are_rejected() {
        let set = ScaffoldFileSet::new("domains/x")
            .with_file(rel("api/x.go"), "a")
            .with_file(rel("api/x.go"), "b");
        assert!(matches!(
            set.validate(),
            Err(DomainError::DuplicatePath { .. })
        ));
    }

    #[test]
    fn paths_must_fall_under_layout() {
        let ok = ScaffoldFileSet::new("domains/x")
            .with_directory(rel("views"))
            .with_file(rel("repo/db/x.go"), "")
            .with_file(rel("errors.go"), "");
        assert!(ok.validate().is_ok());

        let bad = ScaffoldFileSet::new("domains/x").with_file(rel("scripts/run.sh"), "");
        assert!(matches!(
            bad.validate(),
            Err(DomainError::PathOutsideLayout { .. })
        ));

        let bad_dir = ScaffoldFileSet::new("domains/x").with_directory(rel("tmp"));
        assert!(bad_dir.validate().is_err());
    }

    #[test]
    fn file_lookup_by_path() {
        let set = ScaffoldFileSet::new("domains/x").with_file(rel("types/x.go"), "package types");
        assert_eq!(set.file("types/x.go").unwrap().content, "package types");
        assert!(set.file("types/y.go").is_none());
    }
}
