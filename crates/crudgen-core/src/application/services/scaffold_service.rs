//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the one-shot domain creation workflow:
//! 1. Validate the name and check the domain directory is free
//! 2. Render the domain template with every derived name form
//! 3. Write the directory tree and files
//! 4. Regenerate types for `models` and `types`
//! 5. Register the domain's API package in the main import block
//! 6. Register watch paths for both generators
//! 7. Regenerate ORM tables for `models`
//!
//! Nothing is written before steps 1 and 2 succeed. From step 3 on, a
//! failure leaves a partially created domain on disk; it is reported as
//! `PartialScaffold` and is not rolled back. Generator failures in steps 4
//! and 7 are collected as warnings and do not stop the run.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer},
        services::{ConfigPatcher, Generator, ModuleResolver},
    },
    domain::{
        DomainName, DomainTemplate, DomainValidator as validator, FsEntry, GeneratorKind,
        ProjectLayout, RenderContext, ScaffoldFileSet, entities::watch::PATHS_KEY,
    },
    error::CrudgenResult,
};

/// Opening line of the Go import block the API import is added to.
pub const IMPORT_BLOCK_START: &str = "import (";
/// Closing line of that block.
pub const IMPORT_BLOCK_END: &str = ")";

/// Sub-directories of a domain registered for watching.
const WATCHED_SUBDIRS: [&str; 2] = ["models", "types"];

/// What a scaffold run did, for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub domain: String,
    /// Domain directory, relative to the project root.
    pub domain_dir: String,
    /// Created entries, relative to the domain directory, in creation order.
    pub created: Vec<PathBuf>,
    pub generated: Vec<String>,
    pub import_line: String,
    /// `(generator, path)` pairs newly added to the manifest.
    pub registered: Vec<(GeneratorKind, String)>,
    pub warnings: Vec<String>,
}

impl ScaffoldReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Main scaffolding service.
pub struct ScaffoldService {
    layout: ProjectLayout,
    template: DomainTemplate,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Arc<dyn Filesystem>,
    patcher: ConfigPatcher,
    module: Arc<ModuleResolver>,
    type_sync: Arc<Generator>,
    orm_tables: Arc<Generator>,
}

impl ScaffoldService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        layout: ProjectLayout,
        template: DomainTemplate,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Arc<dyn Filesystem>,
        module: Arc<ModuleResolver>,
        type_sync: Arc<Generator>,
        orm_tables: Arc<Generator>,
    ) -> Self {
        Self {
            patcher: ConfigPatcher::new(Arc::clone(&filesystem)),
            layout,
            template,
            renderer,
            filesystem,
            module,
            type_sync,
            orm_tables,
        }
    }

    /// Scaffold a new domain.
    #[instrument(skip(self), fields(root = %self.layout.root.display()))]
    pub async fn scaffold(&self, raw_name: &str) -> CrudgenResult<ScaffoldReport> {
        // 1. Preconditions
        let name = validator::validate_domain_name(raw_name)
            .map_err(|e| ApplicationError::ValidationFailed(e.to_string()))?;

        let domain_path = self.layout.domain_path(&name);
        if self.filesystem.exists(&domain_path).await {
            return Err(ApplicationError::AlreadyExists { path: domain_path }.into());
        }

        // 2. Render
        let module = self.module.module_name().await?;
        let context = RenderContext::new(&name, &module);
        let set = self.renderer.render(&self.template, &context, &domain_path)?;
        validator::validate_file_set(&set)?;

        info!(domain = %name, entries = set.entry_count(), "Scaffolding domain");

        let mut report = ScaffoldReport {
            domain: name.to_string(),
            domain_dir: self.layout.domain_dir(&name),
            import_line: self.layout.api_import_line(&module, &name),
            ..ScaffoldReport::default()
        };

        // 3..7. Anything failing from here on leaves files behind.
        self.materialize(&name, &set, &mut report)
            .await
            .map_err(|cause| {
                warn!(path = %domain_path.display(), error = %cause, "Scaffold left incomplete");
                ApplicationError::PartialScaffold {
                    path: domain_path.clone(),
                    cause: cause.to_string(),
                }
            })?;

        info!(domain = %name, warnings = report.warnings.len(), "Domain scaffolded");
        Ok(report)
    }

    async fn materialize(
        &self,
        name: &DomainName,
        set: &ScaffoldFileSet,
        report: &mut ScaffoldReport,
    ) -> CrudgenResult<()> {
        self.write_set(set, report).await?;

        let domain_dir = self.layout.domain_dir(name);
        for sub in WATCHED_SUBDIRS {
            self.try_generate(&self.type_sync, &format!("{domain_dir}/{sub}"), report)
                .await;
        }

        self.patcher
            .insert_import(
                &self.layout.main_file_path(),
                IMPORT_BLOCK_START,
                IMPORT_BLOCK_END,
                &report.import_line,
            )
            .await?;

        let manifest = self.layout.manifest_path();
        for kind in GeneratorKind::ALL {
            for sub in WATCHED_SUBDIRS {
                let entry = self.layout.watch_entry(name, sub);
                let added = self
                    .patcher
                    .append_unique_path(&manifest, kind.config_key(), PATHS_KEY, &entry)
                    .await?;
                if added {
                    report.registered.push((kind, entry));
                }
            }
        }

        self.try_generate(&self.orm_tables, &format!("{domain_dir}/models"), report)
            .await;

        Ok(())
    }

    async fn write_set(
        &self,
        set: &ScaffoldFileSet,
        report: &mut ScaffoldReport,
    ) -> CrudgenResult<()> {
        self.filesystem.create_dir_all(set.root()).await?;

        for entry in set.entries() {
            let path = set.root().join(entry.path());
            match entry {
                FsEntry::Directory(_) => self.filesystem.create_dir_all(&path).await?,
                FsEntry::File(file) => {
                    if let Some(parent) = path.parent() {
                        self.filesystem.create_dir_all(parent).await?;
                    }
                    self.filesystem.write_file(&path, &file.content).await?;
                }
            }
            report.created.push(entry.path().as_path().to_path_buf());
        }

        Ok(())
    }

    async fn try_generate(&self, generator: &Generator, target: &str, report: &mut ScaffoldReport) {
        match generator.generate(target).await {
            Ok(done) => report.generated.push(done.output),
            Err(e) => {
                warn!(
                    kind = %generator.kind(),
                    dir = target,
                    error = %e,
                    "Generation failed during scaffold"
                );
                report.warnings.push(e.to_string());
            }
        }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }
}
