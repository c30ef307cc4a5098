//! crudgen core - hexagonal architecture implementation
//!
//! This crate provides the domain and application layers for crudgen, the
//! scaffolding and code-generation tool for multi-domain CRUD projects
//! (Go backend, TypeScript frontend).
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            crudgen-cli (CLI)            │
//! │       (Implements Driving Ports)        │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services           │
//! │ (ScaffoldService, Generator, Watch...)  │
//! │          Orchestrates Use Cases         │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Filesystem, ProcessRunner, Change...)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     crudgen-adapters (Infrastructure)   │
//! │ (LocalFilesystem, TokioProcessRunner)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (DomainName, RenderContext, patching)   │
//! │           No I/O, no async              │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crudgen_core::prelude::*;
//!
//! let layout = ProjectLayout::at(".");
//! let module = Arc::new(ModuleResolver::new(layout.go_mod_path(), fs.clone()));
//! let type_sync = Arc::new(Generator::new(
//!     GeneratorKind::TypeSync,
//!     settings.clone(),
//!     &layout.root,
//!     fs.clone(),
//!     runner.clone(),
//!     module.clone(),
//! ));
//! // ... orm_tables likewise
//!
//! let service =
//!     ScaffoldService::new(layout, template, renderer, fs, module, type_sync, orm_tables);
//! let report = service.scaffold("comment").await?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ConfigPatcher, GenerationReport, Generator, ManifestReader, ModuleResolver,
        ScaffoldReport, ScaffoldService, WatchSupervisor,
        ports::{
            ChangeSource, Filesystem, ProcessOutput, ProcessRunner, TemplateRenderer,
            WatchReporter,
        },
    };
    pub use crate::domain::{
        DomainName, DomainTemplate, GeneratorKind, GeneratorSettings, ProjectLayout,
        RenderContext, SourceFilter, WatchState,
    };
    pub use crate::error::{CrudgenError, CrudgenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
