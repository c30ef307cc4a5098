//! Generation plans: what to write, what to run, and what it produces.
//!
//! A plan is computed up front from the target directory so the
//! application layer only has to execute it. Nothing here touches the
//! filesystem or spawns a process.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::GeneratorKind;

/// File name of the transient type-sync descriptor.
pub const TYPE_SYNC_ARTIFACT: &str = "tygo_temp.yaml";

/// Where the external generators live and where transient files go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    pub tygo_program: String,
    pub gorm_program: String,
    pub artifact_dir: PathBuf,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            tygo_program: "tygo".into(),
            gorm_program: "gorm".into(),
            artifact_dir: std::env::temp_dir(),
        }
    }
}

impl GeneratorSettings {
    /// Where the type-sync descriptor is written.
    pub fn type_sync_artifact(&self) -> PathBuf {
        self.artifact_dir.join(TYPE_SYNC_ARTIFACT)
    }
}

/// An external command line, ready to hand to a process runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationCommand {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl GenerationCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

impl fmt::Display for GenerationCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// A transient configuration file that must exist only while the
/// generator runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationArtifact {
    pub path: PathBuf,
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    pub kind: GeneratorKind,
    pub target: String,
    pub artifact: Option<GenerationArtifact>,
    pub command: GenerationCommand,
    /// Human-facing location of the generated output.
    pub output: String,
}

impl GenerationPlan {
    /// `tygo generate --config <artifact>` over `<module>/<target>`.
    pub fn type_sync(target: &str, module: &str, settings: &GeneratorSettings) -> Self {
        let target = normalize_target(target);
        let artifact_path = settings.type_sync_artifact();
        let contents = tygo_descriptor(&format!("{module}/{target}"));

        let command = GenerationCommand::new(&settings.tygo_program)
            .arg("generate")
            .arg("--config")
            .arg(artifact_path.display().to_string());

        Self {
            kind: GeneratorKind::TypeSync,
            output: format!("{target}/index.ts"),
            artifact: Some(GenerationArtifact {
                path: artifact_path,
                contents,
            }),
            command,
            target,
        }
    }

    /// `gorm gen -i <target> -o <parent>/tables`.
    pub fn orm_tables(target: &str, settings: &GeneratorSettings) -> Self {
        let target = normalize_target(target);
        let output = format!("{}/tables", parent_dir(&target));

        let command = GenerationCommand::new(&settings.gorm_program)
            .arg("gen")
            .arg("-i")
            .arg(&target)
            .arg("-o")
            .arg(&output);

        Self {
            kind: GeneratorKind::OrmTables,
            artifact: None,
            command,
            output,
            target,
        }
    }
}

/// Canonical spelling of a target directory: forward slashes, no leading
/// `./`, no trailing separator.
pub fn normalize_target(target: &str) -> String {
    let unified = target.replace('\\', "/");
    let mut s = unified.as_str();
    while let Some(rest) = s.strip_prefix("./") {
        s = rest;
    }
    let s = s.trim_end_matches('/');
    if s.is_empty() { ".".to_string() } else { s.to_string() }
}

fn parent_dir(target: &str) -> String {
    match Path::new(target).parent() {
        Some(p) if !p.as_os_str().is_empty() => p.display().to_string(),
        _ => ".".to_string(),
    }
}

fn tygo_descriptor(package: &str) -> String {
    format!(
        "\ntype_mappings:\n  time.Time: \"string /* RFC3339 */\"\npackages:\n    - path: \"{package}\"\n      indent: \"    \"\n      enum_style: \"enum\"\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> GeneratorSettings {
        GeneratorSettings {
            artifact_dir: PathBuf::from("/tmp"),
            ..Default::default()
        }
    }

    #[test]
    fn normalizes_targets() {
        assert_eq!(normalize_target("./domains/a/models/"), "domains/a/models");
        assert_eq!(normalize_target("domains\\a\\types"), "domains/a/types");
        assert_eq!(normalize_target("./"), ".");
    }

    #[test]
    fn type_sync_plan_writes_descriptor_and_reports_index() {
        let plan =
            GenerationPlan::type_sync("./domains/a/models/", "github.com/acme/app", &settings());

        let artifact = plan.artifact.unwrap();
        assert_eq!(artifact.path, PathBuf::from("/tmp/tygo_temp.yaml"));
        assert!(artifact.contents.contains("path: \"github.com/acme/app/domains/a/models\""));
        assert!(artifact.contents.contains("time.Time: \"string /* RFC3339 */\""));
        assert!(artifact.contents.contains("enum_style: \"enum\""));

        assert_eq!(plan.command.program, "tygo");
        assert_eq!(plan.command.args, ["generate", "--config", "/tmp/tygo_temp.yaml"]);
        assert_eq!(plan.output, "domains/a/models/index.ts");
    }

    #[test]
    fn orm_plan_targets_sibling_tables_dir() {
        let plan = GenerationPlan::orm_tables("domains/a/models", &settings());
        assert!(plan.artifact.is_none());
        assert_eq!(plan.command.to_string(), "gorm gen -i domains/a/models -o domains/a/tables");
        assert_eq!(plan.output, "domains/a/tables");

        let flat = GenerationPlan::orm_tables("models", &settings());
        assert_eq!(flat.output, "./tables");
    }

    #[test]
    fn type_sync_artifact_lives_in_artifact_dir() {
        let s = settings();
        let path = s.type_sync_artifact();
        assert_eq!(path.parent(), Some(s.artifact_dir.as_path()));
        assert!(path.ends_with(TYPE_SYNC_ARTIFACT));
    }
}
