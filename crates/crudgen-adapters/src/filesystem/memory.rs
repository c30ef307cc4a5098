//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use async_trait::async_trait;
use crudgen_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{CrudgenError, CrudgenResult},
};

/// In-memory filesystem for testing.
///
/// Clones share the same contents, so a test can keep one handle and give
/// another to the service under test. Every mutating call is counted.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    writes: usize,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file (and its parent directories) without counting a write.
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                insert_ancestors(&mut inner.directories, parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
        self
    }

    /// Seed a directory without counting a write.
    pub fn with_directory(self, path: impl AsRef<Path>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            insert_ancestors(&mut inner.directories, path.as_ref());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// All files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Files and directories under `root`, relative to it, sorted.
    pub fn tree(&self, root: impl AsRef<Path>) -> Vec<PathBuf> {
        let root = root.as_ref();
        let Ok(inner) = self.inner.read() else {
            return Vec::new();
        };
        let mut entries: BTreeSet<PathBuf> = BTreeSet::new();
        for path in inner.files.keys().chain(inner.directories.iter()) {
            if let Ok(rel) = path.strip_prefix(root) {
                if !rel.as_os_str().is_empty() {
                    entries.insert(rel.to_path_buf());
                }
            }
        }
        entries.into_iter().collect()
    }

    /// Number of create/write/remove calls made through the port.
    pub fn write_count(&self) -> usize {
        self.inner.read().map(|inner| inner.writes).unwrap_or(0)
    }

    fn write_guard(
        &self,
    ) -> CrudgenResult<std::sync::RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| CrudgenError::Internal {
            message: "memory filesystem lock poisoned".into(),
        })
    }
}

fn insert_ancestors(directories: &mut BTreeSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}

fn not_found(path: &Path, reason: &str) -> CrudgenError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

#[async_trait]
impl Filesystem for MemoryFilesystem {
    async fn create_dir_all(&self, path: &Path) -> CrudgenResult<()> {
        let mut inner = self.write_guard()?;
        inner.writes += 1;
        insert_ancestors(&mut inner.directories, path);
        Ok(())
    }

    async fn write_file(&self, path: &Path, content: &str) -> CrudgenResult<()> {
        let mut inner = self.write_guard()?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(not_found(path, "Parent directory does not exist"));
            }
        }

        inner.writes += 1;
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    async fn read_to_string(&self, path: &Path) -> CrudgenResult<String> {
        self.read_file(path)
            .ok_or_else(|| not_found(path, "No such file"))
    }

    async fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    async fn remove_file(&self, path: &Path) -> CrudgenResult<()> {
        let mut inner = self.write_guard()?;
        inner.writes += 1;
        inner
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path, "No such file"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_files_are_readable_and_uncounted() {
        let fs = MemoryFilesystem::new().with_file("/p/go.mod", "module app\n");
        assert!(fs.exists(Path::new("/p")).await);
        assert_eq!(fs.read_to_string(Path::new("/p/go.mod")).await.unwrap(), "module app\n");
        assert_eq!(fs.write_count(), 0);
    }

    #[tokio::test]
    async fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/x/y.go"), "").await.is_err());

        fs.create_dir_all(Path::new("/x")).await.unwrap();
        fs.write_file(Path::new("/x/y.go"), "").await.unwrap();
        assert_eq!(fs.tree("/x"), vec![PathBuf::from("y.go")]);
        assert_eq!(fs.write_count(), 2);
    }
}
