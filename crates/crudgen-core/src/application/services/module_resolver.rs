use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::debug;

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::patch,
    error::CrudgenResult,
};

/// The hosting Go module path, read from `go.mod` on first use and cached
/// for the life of the process.
pub struct ModuleResolver {
    go_mod: PathBuf,
    filesystem: Arc<dyn Filesystem>,
    cached: OnceCell<String>,
}

impl ModuleResolver {
    pub fn new(go_mod: impl Into<PathBuf>, filesystem: Arc<dyn Filesystem>) -> Self {
        Self {
            go_mod: go_mod.into(),
            filesystem,
            cached: OnceCell::new(),
        }
    }

    /// A failed lookup is not cached; the next call tries again.
    pub async fn module_name(&self) -> CrudgenResult<String> {
        let name = self
            .cached
            .get_or_try_init(|| async {
                let text = self.filesystem.read_to_string(&self.go_mod).await?;
                let name = patch::parse_module_name(&text)
                    .map_err(|e| ApplicationError::from_domain(&self.go_mod, e))?;
                debug!(module = %name, "Resolved Go module");
                Ok::<_, crate::error::CrudgenError>(name)
            })
            .await?;

        Ok(name.clone())
    }
}
