//! Simple variable substitution renderer.

use std::path::Path;

use crudgen_core::{
    application::ports::TemplateRenderer,
    domain::{
        DomainTemplate, DomainValidator as validator, RelativePath, RenderContext, ScaffoldFileSet,
    },
    error::CrudgenResult,
};
use tracing::instrument;

/// Simple renderer using `{{VARIABLE}}` substitution on both file paths
/// and file bodies.
pub struct SimpleRenderer;

impl SimpleRenderer {
    /// Create a new simple renderer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for SimpleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(domain = %context.domain()))]
    fn render(
        &self,
        template: &DomainTemplate,
        context: &RenderContext,
        output_root: &Path,
    ) -> CrudgenResult<ScaffoldFileSet> {
        let mut set = ScaffoldFileSet::new(output_root);

        for dir in &template.directories {
            set.add_directory(RelativePath::try_new(context.render(dir.path))?);
        }

        for file in &template.files {
            let path = RelativePath::try_new(context.render(file.path))?;
            set.add_file(path, context.render(file.body));
        }

        // Validate final structure
        validator::validate_file_set(&set)?;

        Ok(set)
    }
}
