//! Generation Service - serialized invocation of one external generator.
//!
//! One [`Generator`] exists per [`GeneratorKind`] for the life of the
//! process. Its lock is held for the whole of a `generate` call, covering
//! artifact creation, the subprocess run and artifact removal, so two calls
//! for the same kind never overlap even when they target different
//! directories. The two kinds hold separate locks and may run side by side.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, ProcessRunner},
        services::ModuleResolver,
    },
    domain::{GenerationArtifact, GenerationPlan, GeneratorKind, GeneratorSettings},
    error::CrudgenResult,
};

/// Outcome of a successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub kind: GeneratorKind,
    pub target: String,
    /// Where the generator wrote its output, for display.
    pub output: String,
    pub duration: Duration,
}

pub struct Generator {
    kind: GeneratorKind,
    settings: GeneratorSettings,
    project_root: PathBuf,
    filesystem: Arc<dyn Filesystem>,
    runner: Arc<dyn ProcessRunner>,
    module: Arc<ModuleResolver>,
    lock: Mutex<()>,
}

impl Generator {
    pub fn new(
        kind: GeneratorKind,
        settings: GeneratorSettings,
        project_root: impl Into<PathBuf>,
        filesystem: Arc<dyn Filesystem>,
        runner: Arc<dyn ProcessRunner>,
        module: Arc<ModuleResolver>,
    ) -> Self {
        Self {
            kind,
            settings,
            project_root: project_root.into(),
            filesystem,
            runner,
            module,
            lock: Mutex::new(()),
        }
    }

    pub fn kind(&self) -> GeneratorKind {
        self.kind
    }

    /// Regenerate derived output for `target` (relative to the project root).
    ///
    /// Waits for any other call on this generator to finish first. A
    /// non-zero exit surfaces as `GenerationFailed` carrying the captured
    /// stderr. The temporary artifact, if any, is gone when this returns.
    #[instrument(skip(self), fields(kind = %self.kind))]
    pub async fn generate(&self, target: &str) -> CrudgenResult<GenerationReport> {
        let _guard = self.lock.lock().await;
        let started = Instant::now();

        let plan = self.plan(target).await?;
        let command = plan.command.clone().working_dir(&self.project_root);
        debug!(command = %command, "Running generator");

        if let Some(artifact) = &plan.artifact {
            if let Err(e) = self.write_artifact(artifact).await {
                self.discard(&artifact.path).await;
                return Err(e);
            }
        }

        let outcome = self.runner.run(&command).await;

        if let Some(artifact) = &plan.artifact {
            self.discard(&artifact.path).await;
        }

        let output = outcome?;
        if !output.is_success() {
            return Err(ApplicationError::GenerationFailed {
                kind: self.kind,
                target: plan.target,
                code: output.code,
                stderr: output.stderr.trim_end().to_string(),
            }
            .into());
        }

        info!(output = %plan.output, "Generation finished");
        Ok(GenerationReport {
            kind: self.kind,
            target: plan.target,
            output: plan.output,
            duration: started.elapsed(),
        })
    }

    async fn plan(&self, target: &str) -> CrudgenResult<GenerationPlan> {
        Ok(match self.kind {
            GeneratorKind::TypeSync => {
                let module = self.module.module_name().await?;
                GenerationPlan::type_sync(target, &module, &self.settings)
            }
            GeneratorKind::OrmTables => GenerationPlan::orm_tables(target, &self.settings),
        })
    }

    async fn write_artifact(&self, artifact: &GenerationArtifact) -> CrudgenResult<()> {
        if let Some(parent) = artifact.path.parent() {
            self.filesystem.create_dir_all(parent).await?;
        }
        self.filesystem
            .write_file(&artifact.path, &artifact.contents)
            .await
    }

    async fn discard(&self, path: &Path) {
        if !self.filesystem.exists(path).await {
            return;
        }
        if let Err(e) = self.filesystem.remove_file(path).await {
            warn!(path = %path.display(), error = %e, "Could not remove generator artifact");
        }
    }
}
