//! Config Patcher - error-checked edits of existing project files.
//!
//! Every operation reads the whole file, computes the new contents with a
//! pure transform from `crate::domain::patch`, and writes the file back
//! only if the transform succeeded. A structural error therefore never
//! leaves a half-edited file behind.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::patch,
    error::CrudgenResult,
};

pub struct ConfigPatcher {
    filesystem: Arc<dyn Filesystem>,
}

impl ConfigPatcher {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Insert `new_line` just before the line closing the block opened by
    /// `block_start`.
    ///
    /// The line is inserted even if the block already contains it.
    #[instrument(skip(self, new_line), fields(file = %file.display()))]
    pub async fn insert_import(
        &self,
        file: &Path,
        block_start: &str,
        block_end: &str,
        new_line: &str,
    ) -> CrudgenResult<()> {
        let text = self.filesystem.read_to_string(file).await?;

        let patched = patch::insert_line_in_block(&text, block_start, block_end, new_line)
            .map_err(|e| ApplicationError::from_domain(file, e))?;

        self.filesystem.write_file(file, &patched).await?;
        debug!(line = new_line.trim(), "Inserted import");
        Ok(())
    }

    /// Append `new_path` to `<object_key>.<array_key>` in a JSON file unless
    /// it is already listed. The file is rewritten with four-space
    /// indentation and a trailing newline.
    ///
    /// Returns whether the file changed.
    #[instrument(skip(self), fields(file = %file.display()))]
    pub async fn append_unique_path(
        &self,
        file: &Path,
        object_key: &str,
        array_key: &str,
        new_path: &str,
    ) -> CrudgenResult<bool> {
        let text = self.filesystem.read_to_string(file).await?;
        let mut manifest =
            patch::parse_json(&text).map_err(|e| ApplicationError::from_domain(file, e))?;

        let added = patch::append_unique(&mut manifest, object_key, array_key, new_path)
            .map_err(|e| ApplicationError::from_domain(file, e))?;

        if !added {
            debug!("Path already registered");
            return Ok(false);
        }

        let rendered = patch::to_pretty_json(&manifest)
            .map_err(|e| ApplicationError::from_domain(file, e))?;
        self.filesystem.write_file(file, &rendered).await?;
        debug!("Registered path");
        Ok(true)
    }
}
