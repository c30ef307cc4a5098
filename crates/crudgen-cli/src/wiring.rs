//! Adapter wiring.
//!
//! Builds the long-lived service objects once per process: one filesystem,
//! one process runner, one cached module resolver and exactly one
//! [`Generator`] per kind, so every caller shares that kind's lock.

use std::sync::Arc;

use crudgen_adapters::{
    LocalFilesystem, NotifyChangeSource, SimpleRenderer, TokioProcessRunner, domain_template,
};
use crudgen_core::{
    application::{
        Generator, ManifestReader, ModuleResolver, ScaffoldService, WatchSupervisor,
        ports::{Filesystem, ProcessRunner, WatchReporter},
    },
    domain::GeneratorKind,
};

use crate::config::AppConfig;

pub struct Services {
    config: AppConfig,
    filesystem: Arc<dyn Filesystem>,
    module: Arc<ModuleResolver>,
    type_sync: Arc<Generator>,
    orm_tables: Arc<Generator>,
}

impl Services {
    pub fn new(config: AppConfig) -> Self {
        let filesystem: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
        let runner: Arc<dyn ProcessRunner> = Arc::new(TokioProcessRunner::new());
        let module = Arc::new(ModuleResolver::new(
            config.project.go_mod_path(),
            Arc::clone(&filesystem),
        ));

        let generator = |kind| {
            Arc::new(Generator::new(
                kind,
                config.generators.clone(),
                config.project.root.clone(),
                Arc::clone(&filesystem),
                Arc::clone(&runner),
                Arc::clone(&module),
            ))
        };
        let type_sync = generator(GeneratorKind::TypeSync);
        let orm_tables = generator(GeneratorKind::OrmTables);

        Self {
            config,
            filesystem,
            module,
            type_sync,
            orm_tables,
        }
    }

    pub fn generator(&self, kind: GeneratorKind) -> Arc<Generator> {
        match kind {
            GeneratorKind::TypeSync => Arc::clone(&self.type_sync),
            GeneratorKind::OrmTables => Arc::clone(&self.orm_tables),
        }
    }

    pub fn scaffolder(&self) -> ScaffoldService {
        ScaffoldService::new(
            self.config.project.clone(),
            domain_template(),
            Box::new(SimpleRenderer::new()),
            Arc::clone(&self.filesystem),
            Arc::clone(&self.module),
            self.generator(GeneratorKind::TypeSync),
            self.generator(GeneratorKind::OrmTables),
        )
    }

    pub fn supervisor(
        &self,
        kind: GeneratorKind,
        reporter: Arc<dyn WatchReporter>,
    ) -> WatchSupervisor {
        let manifest = Arc::new(ManifestReader::new(
            self.config.project.manifest_path(),
            Arc::clone(&self.filesystem),
        ));
        let source =
            Arc::new(NotifyChangeSource::new().with_debounce(self.config.watch.debounce()));

        WatchSupervisor::new(
            self.generator(kind),
            manifest,
            source,
            &self.config.project,
            self.config.watch.filter(),
        )
        .with_reporter(reporter)
    }
}
