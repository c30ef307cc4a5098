// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for crudgen.
//!
//! This module contains pure business logic. Filesystem access, process
//! spawning and change notification are handled via ports (traits) defined
//! in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: Text in, text out
//! - **Few crates**: std, thiserror, serde and serde_json (manifest values)
//! - **Immutable entities**: Domain objects are Clone + PartialEq
//!
// Public API - what the world sees
pub mod casing;
pub mod entities;
pub mod error;
pub mod patch;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use entities::{
    ChangeKind, DirectoryToCreate, DomainTemplate, FileToWrite, FsEntry, GenerationArtifact,
    GenerationCommand, GenerationPlan, GeneratorSettings, ProjectLayout, RelativePath,
    RenderContext, ScaffoldFileSet, SourceFilter, WatchConfig, WatchState,
    scaffold_set::DOMAIN_LAYOUT,
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{DomainName, GeneratorKind};

pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Cross-entity checks
    // ========================================================================

    #[test]
    fn camel_is_pascal_with_lowered_first_char() {
        for raw in ["article", "blog_post", "user-role", "x", "api2_key"] {
            let name = DomainName::parse(raw).unwrap();
            let pascal = name.pascal();
            let camel = name.camel();
            assert_eq!(camel.len(), pascal.len());
            assert_eq!(camel[1..], pascal[1..]);
            assert_eq!(
                camel.chars().next().unwrap(),
                pascal.chars().next().unwrap().to_ascii_lowercase()
            );
        }
    }

    #[test]
    fn pascal_is_stable_on_pascal_input() {
        for raw in ["Article", "BlogPost"] {
            let once = casing::to_pascal_case(raw);
            assert_eq!(casing::to_pascal_case(&once), once);
        }
    }

    #[test]
    fn validator_trims_and_parses_names() {
        assert_eq!(
            DomainValidator::validate_domain_name("  comment ").unwrap().as_str(),
            "comment"
        );
        assert_eq!(
            DomainValidator::validate_domain_name("   "),
            Err(DomainError::EmptyDomainName)
        );
    }

    #[test]
    fn validator_rejects_blank_watch_entries() {
        let cfg = WatchConfig::new(GeneratorKind::TypeSync, vec!["./a".into(), " ".into()]);
        assert!(DomainValidator::validate_watch_config(&cfg).is_err());
    }

    #[test]
    fn rendered_paths_fit_the_layout() {
        let name = DomainName::parse("comment").unwrap();
        let ctx = RenderContext::new(&name, "app");
        let path = RelativePath::try_new(ctx.render("repo/db/{{DOMAIN}}.go")).unwrap();
        let set = ScaffoldFileSet::new("domains/comment").with_file(path, "package db");
        assert!(DomainValidator::validate_file_set(&set).is_ok());
    }
}
