use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::DomainName;

/// Where things live inside a hosting project. All fields except `root`
/// are relative to `root`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLayout {
    pub root: PathBuf,
    /// Shared JSON manifest holding the per-generator watch sections.
    pub manifest: PathBuf,
    pub go_mod: PathBuf,
    /// Go file whose import block gets one blank import per domain.
    pub main_file: PathBuf,
    pub domains_dir: String,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            manifest: PathBuf::from("package.json"),
            go_mod: PathBuf::from("go.mod"),
            main_file: PathBuf::from("server/main/main.go"),
            domains_dir: "domains".into(),
        }
    }
}

impl ProjectLayout {
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.resolve(&self.manifest)
    }

    pub fn go_mod_path(&self) -> PathBuf {
        self.resolve(&self.go_mod)
    }

    pub fn main_file_path(&self) -> PathBuf {
        self.resolve(&self.main_file)
    }

    /// `domains/<name>`, relative to the root.
    pub fn domain_dir(&self, name: &DomainName) -> String {
        format!("{}/{}", self.domains_dir.trim_end_matches('/'), name)
    }

    pub fn domain_path(&self, name: &DomainName) -> PathBuf {
        self.resolve(self.domain_dir(name))
    }

    /// Entry registered in a manifest watch list, e.g. `./domains/article/models`.
    pub fn watch_entry(&self, name: &DomainName, sub: &str) -> String {
        format!("./{}/{}", self.domain_dir(name), sub)
    }

    /// Blank import line added to the main file's import block.
    pub fn api_import_line(&self, module: &str, name: &DomainName) -> String {
        format!("\t_ \"{}/{}/api\"", module, self.domain_dir(name))
    }
}
