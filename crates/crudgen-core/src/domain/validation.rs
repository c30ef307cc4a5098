use crate::domain::{
    entities::{ScaffoldFileSet, WatchConfig},
    error::DomainError,
    value_objects::DomainName,
};

/// Centralized domain validation.
///
/// Entities enforce their own invariants; this is the single entry point
/// services call so the checks are not scattered across the call sites.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_domain_name(raw: &str) -> Result<DomainName, DomainError> {
        DomainName::parse(raw.trim())
    }

    pub fn validate_file_set(set: &ScaffoldFileSet) -> Result<(), DomainError> {
        set.validate()
    }

    /// Watch entries must be non-empty strings.
    pub fn validate_watch_config(config: &WatchConfig) -> Result<(), DomainError> {
        match config.paths().iter().find(|p| p.trim().is_empty()) {
            Some(_) => Err(DomainError::NotAStringArray {
                key: format!("{}.paths", config.kind().config_key()),
            }),
            None => Ok(()),
        }
    }
}
