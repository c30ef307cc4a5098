use std::path::PathBuf;
use std::sync::Arc;

use tracing::trace;

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{DomainValidator, GeneratorKind, WatchConfig, patch},
    error::CrudgenResult,
};

/// Reads watch configuration out of the project manifest.
///
/// The file is re-read on every call; watch sessions rely on that to see
/// edits.
pub struct ManifestReader {
    path: PathBuf,
    filesystem: Arc<dyn Filesystem>,
}

impl ManifestReader {
    pub fn new(path: impl Into<PathBuf>, filesystem: Arc<dyn Filesystem>) -> Self {
        Self {
            path: path.into(),
            filesystem,
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub async fn watch_config(&self, kind: GeneratorKind) -> CrudgenResult<WatchConfig> {
        let text = self.filesystem.read_to_string(&self.path).await?;
        let manifest =
            patch::parse_json(&text).map_err(|e| ApplicationError::from_domain(&self.path, e))?;

        let config = WatchConfig::from_manifest(&manifest, kind)
            .and_then(|c| DomainValidator::validate_watch_config(&c).map(|()| c))
            .map_err(|e| ApplicationError::from_domain(&self.path, e))?;

        trace!(kind = %kind, paths = ?config.paths(), "Read watch config");
        Ok(config)
    }
}
