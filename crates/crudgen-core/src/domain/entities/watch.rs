use std::fmt;
use std::path::Path;

use serde_json::Value;

use crate::domain::{error::DomainError, value_objects::GeneratorKind};

/// Name of the array inside each generator section of the manifest.
pub const PATHS_KEY: &str = "paths";

/// The list of directories one generator kind watches, as persisted in the
/// project manifest under `<kind>.paths`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    kind: GeneratorKind,
    paths: Vec<String>,
}

impl WatchConfig {
    pub fn new(kind: GeneratorKind, paths: Vec<String>) -> Self {
        Self { kind, paths }
    }

    /// Read `<kind>.paths` out of a parsed manifest.
    pub fn from_manifest(manifest: &Value, kind: GeneratorKind) -> Result<Self, DomainError> {
        let key = kind.config_key();
        let section = manifest
            .get(key)
            .filter(|v| v.is_object())
            .ok_or_else(|| DomainError::MissingSection { key: key.into() })?;

        let array = section
            .get(PATHS_KEY)
            .and_then(Value::as_array)
            .ok_or_else(|| DomainError::MissingSection {
                key: format!("{key}.{PATHS_KEY}"),
            })?;

        let paths = array
            .iter()
            .map(|v| v.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| DomainError::NotAStringArray {
                key: format!("{key}.{PATHS_KEY}"),
            })?;

        Ok(Self { kind, paths })
    }

    pub fn kind(&self) -> GeneratorKind {
        self.kind
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Serialized form used to decide whether a manifest rewrite actually
    /// changed the watched set. Order-sensitive, like the stored array.
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.paths).unwrap_or_default()
    }
}

// ── Supervisor state ─────────────────────────────────────────────────────────

/// Lifecycle of a watch session.
///
/// ```text
/// Idle ──start──▶ Watching ──config event──▶ Reconciling ──▶ Watching
///                     │
///                  signal
///                     ▼
///               ShuttingDown ──▶ Stopped
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Idle,
    Watching,
    Reconciling,
    ShuttingDown,
    Stopped,
}

impl fmt::Display for WatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Watching => "watching",
            Self::Reconciling => "reconciling",
            Self::ShuttingDown => "shutting down",
            Self::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

// ── Change events ────────────────────────────────────────────────────────────

/// What happened to a path. The watcher backend coalesces create and modify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Changed,
    Removed,
}

/// Which source-file events should trigger a generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFilter {
    extension: String,
}

impl SourceFilter {
    pub fn new(extension: impl Into<String>) -> Self {
        let extension = extension.into();
        Self {
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Files with the source extension pass. A removed path without an
    /// extension is assumed to be a directory and passes too.
    pub fn accepts(&self, path: &Path, kind: ChangeKind) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => ext == self.extension,
            None => kind == ChangeKind::Removed,
        }
    }
}

impl Default for SourceFilter {
    fn default() -> Self {
        Self::new("go")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_paths_from_manifest() {
        let manifest = json!({
            "name": "app",
            "go2ts": { "paths": ["./domains/a/models", "./domains/a/types"] },
        });
        let cfg = WatchConfig::from_manifest(&manifest, GeneratorKind::TypeSync).unwrap();
        assert_eq!(cfg.paths(), ["./domains/a/models", "./domains/a/types"]);
    }

    #[test]
    fn missing_section_or_array_is_reported() {
        let manifest = json!({ "go2ts": {} });
        assert!(matches!(
            WatchConfig::from_manifest(&manifest, GeneratorKind::OrmTables),
            Err(DomainError::MissingSection { key }) if key == "orm-gen"
        ));
        assert!(matches!(
            WatchConfig::from_manifest(&manifest, GeneratorKind::TypeSync),
            Err(DomainError::MissingSection { key }) if key == "go2ts.paths"
        ));
    }

    #[test]
    fn non_string_entries_are_rejected() {
        let manifest = json!({ "go2ts": { "paths": ["ok", 3] } });
        assert!(matches!(
            WatchConfig::from_manifest(&manifest, GeneratorKind::TypeSync),
            Err(DomainError::NotAStringArray { .. })
        ));
    }

    #[test]
    fn snapshot_tracks_content_and_order() {
        let a = WatchConfig::new(GeneratorKind::TypeSync, vec!["x".into(), "y".into()]);
        let b = WatchConfig::new(GeneratorKind::TypeSync, vec!["x".into(), "y".into()]);
        let c = WatchConfig::new(GeneratorKind::TypeSync, vec!["y".into(), "x".into()]);
        assert_eq!(a.snapshot(), b.snapshot());
        assert_ne!(a.snapshot(), c.snapshot());
    }

    #[test]
    fn filter_keeps_source_files_and_removed_dirs() {
        let filter = SourceFilter::new(".go");
        assert!(filter.accepts(Path::new("domains/a/models/a.go"), ChangeKind::Changed));
        assert!(!filter.accepts(Path::new("domains/a/models/a.ts"), ChangeKind::Changed));
        assert!(!filter.accepts(Path::new("domains/a/models"), ChangeKind::Changed));
        assert!(filter.accepts(Path::new("domains/a/models"), ChangeKind::Removed));
    }
}
