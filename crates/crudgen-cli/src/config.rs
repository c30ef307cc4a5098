//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only receives the pieces it needs
//! ([`ProjectLayout`], [`GeneratorSettings`]).
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (`-C` overrides `project.root`)
//! 2. Environment variables: `CRUDGEN_<SECTION>__<KEY>`
//! 3. Project config file: `--config FILE`, else `<project>/crudgen.toml`
//! 4. User config file in the platform config directory
//! 5. Built-in defaults (always present)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use config::{Config, Environment, File};
use crudgen_core::domain::{GeneratorSettings, ProjectLayout, SourceFilter};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the per-project configuration file.
pub const PROJECT_CONFIG_FILE: &str = "crudgen.toml";

const ENV_PREFIX: &str = "CRUDGEN";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the manifest, `go.mod`, main file and domains live.
    pub project: ProjectLayout,
    /// External generator programs and the artifact directory.
    pub generators: GeneratorSettings,
    pub watch: WatchSettings,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchSettings {
    /// Source file extension that triggers regeneration.
    pub extension: String,
    pub debounce_ms: u64,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            extension: "go".into(),
            debounce_ms: 300,
        }
    }
}

impl WatchSettings {
    pub fn filter(&self) -> SourceFilter {
        SourceFilter::new(&self.extension)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration for the project in `project_dir`.
    ///
    /// An explicit `config_file` must exist; the default project and user
    /// files are optional.
    pub fn load(config_file: Option<&PathBuf>, project_dir: &Path) -> anyhow::Result<Self> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&Self::default()).context("Failed to encode built-in defaults")?,
        );

        if let Some(user) = Self::user_config_path() {
            builder = builder.add_source(File::from(user).required(false));
        }

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path.clone()).required(true)),
            None => builder
                .add_source(File::from(project_dir.join(PROJECT_CONFIG_FILE)).required(false)),
        };

        let mut cfg: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        cfg.project.root = anchor_root(project_dir, &cfg.project.root);
        Ok(cfg)
    }

    /// Path to the user-level configuration file, if the platform has a
    /// config directory.
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "crudgen", "crudgen")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// Files consulted by [`load`](Self::load), lowest priority first.
    pub fn sources(config_file: Option<&PathBuf>, project_dir: &Path) -> Vec<PathBuf> {
        let mut sources: Vec<PathBuf> = Self::user_config_path().into_iter().collect();
        sources.push(
            config_file
                .cloned()
                .unwrap_or_else(|| project_dir.join(PROJECT_CONFIG_FILE)),
        );
        sources
    }

    /// Look up a dotted key such as `generators.tygo_program`.
    pub fn get(&self, key: &str) -> Option<Value> {
        let tree = serde_json::to_value(self).ok()?;
        key.split('.')
            .try_fold(&tree, |node, part| node.get(part))
            .cloned()
    }
}

/// Resolve a configured root against the directory given on the command line.
fn anchor_root(project_dir: &Path, configured: &Path) -> PathBuf {
    if configured.is_absolute() {
        configured.to_path_buf()
    } else if configured == Path::new(".") || configured.as_os_str().is_empty() {
        project_dir.to_path_buf()
    } else {
        project_dir.join(configured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_conventional_layout() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.project.manifest, PathBuf::from("package.json"));
        assert_eq!(cfg.project.main_file, PathBuf::from("server/main/main.go"));
        assert_eq!(cfg.generators.tygo_program, "tygo");
        assert_eq!(cfg.watch.debounce(), Duration::from_millis(300));
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn load_reads_project_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            "[generators]\ngorm_program = \"/opt/bin/gorm\"\n\n[watch]\ndebounce_ms = 50\n",
        )
        .unwrap();

        let cfg = AppConfig::load(None, dir.path()).unwrap();

        assert_eq!(cfg.generators.gorm_program, "/opt/bin/gorm");
        assert_eq!(cfg.generators.tygo_program, "tygo");
        assert_eq!(cfg.watch.debounce_ms, 50);
        assert_eq!(cfg.project.root, dir.path());
    }

    #[test]
    fn explicit_config_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(AppConfig::load(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn relative_root_is_anchored_to_project_dir() {
        assert_eq!(anchor_root(Path::new("/srv"), Path::new(".")), PathBuf::from("/srv"));
        assert_eq!(
            anchor_root(Path::new("/srv"), Path::new("app")),
            PathBuf::from("/srv/app")
        );
        assert_eq!(
            anchor_root(Path::new("/srv"), Path::new("/opt/app")),
            PathBuf::from("/opt/app")
        );
    }

    #[test]
    fn get_walks_dotted_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("watch.extension"), Some(Value::from("go")));
        assert_eq!(cfg.get("project.domains_dir"), Some(Value::from("domains")));
        assert!(cfg.get("watch").is_some_and(|v| v.is_object()));
        assert_eq!(cfg.get("does.not.exist"), None);
    }
}
