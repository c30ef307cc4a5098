//! Local filesystem adapter using `tokio::fs`.

use std::io;
use std::path::Path;

use async_trait::async_trait;
use crudgen_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{CrudgenError, CrudgenResult},
};

/// Production filesystem implementation using `tokio::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Filesystem for LocalFilesystem {
    async fn create_dir_all(&self, path: &Path) -> CrudgenResult<()> {
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|e| map_io_error(path, e, "create directory"))
    }

    async fn write_file(&self, path: &Path, content: &str) -> CrudgenResult<()> {
        tokio::fs::write(path, content)
            .await
            .map_err(|e| map_io_error(path, e, "write file"))
    }

    async fn read_to_string(&self, path: &Path) -> CrudgenResult<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| map_io_error(path, e, "read file"))
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    async fn remove_file(&self, path: &Path) -> CrudgenResult<()> {
        tokio::fs::remove_file(path)
            .await
            .map_err(|e| map_io_error(path, e, "remove file"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> CrudgenError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_read_remove_round() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        let nested = dir.path().join("a/b");
        let file = nested.join("x.go");

        fs.create_dir_all(&nested).await.unwrap();
        fs.write_file(&file, "package b").await.unwrap();
        assert!(fs.exists(&file).await);
        assert_eq!(fs.read_to_string(&file).await.unwrap(), "package b");

        fs.remove_file(&file).await.unwrap();
        assert!(!fs.exists(&file).await);
    }

    #[tokio::test]
    async fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("package.json");
        let err = LocalFilesystem::new().read_to_string(&missing).await.unwrap_err();
        assert!(err.to_string().contains("package.json"));
    }
}
