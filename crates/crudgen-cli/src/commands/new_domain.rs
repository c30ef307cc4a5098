//! Implementation of the `crudgen new-domain` command.
//!
//! Responsibility: check the argument, call the core scaffold service, and
//! display the result. No business logic lives here.

use serde_json::{Value, json};
use tracing::{info, instrument};

use crudgen_core::application::ScaffoldReport;

use crate::{
    cli::{NewDomainArgs, OutputFormat},
    error::{CliError, CliResult},
    output::OutputManager,
    wiring::Services,
};

const USAGE: &str = "crudgen new-domain <NAME>";

/// Execute the `crudgen new-domain` command.
#[instrument(skip_all, fields(domain = args.name.as_deref().unwrap_or("")))]
pub async fn execute(
    args: NewDomainArgs,
    services: &Services,
    output: &OutputManager,
) -> CliResult<()> {
    let Some(name) = args.name else {
        return Err(CliError::MissingArgument {
            message: "Please provide a domain name.".into(),
            usage: USAGE,
        });
    };

    let json = output.format() == OutputFormat::Json;
    if !json {
        output.header(&format!("Creating domain '{name}'..."))?;
    }

    let report = services.scaffolder().scaffold(&name).await?;
    info!(domain = %report.domain, warnings = report.warnings.len(), "Scaffold completed");

    if json {
        output.json(&report_json(&report))?;
        return Ok(());
    }

    for warning in &report.warnings {
        output.warning(warning)?;
    }

    output.print("")?;
    output.success(&format!("Domain \"{name}\" has been successfully created!"))?;
    output.print("")?;
    output.print("Generated structure:")?;
    output.tree(&report.domain_dir, &summary_entries(&report))?;

    if !report.registered.is_empty() {
        output.print("")?;
        output.print("Registered watch paths:")?;
        for (kind, path) in &report.registered {
            output.print(&format!("   {kind}: {path}"))?;
        }
    }

    output.print("")?;
    output.print("Next steps:")?;
    for (i, step) in next_steps(&report).iter().enumerate() {
        output.print(&format!("   {}. {step}", i + 1))?;
    }

    Ok(())
}

/// Files, empty directories and generated outputs, relative to the domain
/// directory, each with a short description.
fn summary_entries(report: &ScaffoldReport) -> Vec<(String, String)> {
    let created: Vec<String> = report
        .created
        .iter()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .collect();
    let prefix = format!("{}/", report.domain_dir);
    let generated: Vec<String> = report
        .generated
        .iter()
        .filter_map(|g| g.strip_prefix(&prefix).map(str::to_string))
        .collect();

    let mut entries: Vec<String> = Vec::new();
    for path in created.iter().chain(generated.iter()) {
        let is_parent = created
            .iter()
            .chain(generated.iter())
            .any(|other| other.starts_with(&format!("{path}/")));
        if is_parent || entries.contains(path) {
            continue;
        }
        let is_file = path.rsplit('/').next().is_some_and(|leaf| leaf.contains('.'));
        entries.push(if is_file { path.clone() } else { format!("{path}/") });
    }

    // Directory contents first, root-level files last.
    entries.sort_by(|a, b| (!a.contains('/'), a).cmp(&(!b.contains('/'), b)));
    entries
        .into_iter()
        .map(|path| {
            let note = describe(&path);
            (path, note.map(|n| format!("({n})")).unwrap_or_default())
        })
        .collect()
}

fn describe(path: &str) -> Option<&'static str> {
    let ts = path.ends_with(".ts");
    let note = match path.split('/').next()? {
        "api" if ts => "TypeScript API client",
        "api" => "Go API handlers",
        "models" if ts => "data models in TypeScript",
        "models" => "data models in Go",
        "repo" if path.starts_with("repo/db/") => "database implementation",
        "repo" => "repository interface",
        "service" => "business logic",
        "tables" => "GORM query helpers",
        "types" if ts => "DTOs in TypeScript",
        "types" => "DTOs in Go",
        "views" => "views, empty",
        "errors.go" => "domain errors",
        _ => return None,
    };
    Some(note)
}

fn next_steps(report: &ScaffoldReport) -> Vec<String> {
    let name = &report.domain;
    let dir = &report.domain_dir;
    vec![
        format!("Add fields to models/{name}.go"),
        format!("Run `crudgen go2ts {dir}/models` to generate TypeScript models"),
        format!("Run `crudgen orm-gen {dir}/models` to generate table helpers"),
        format!("Update types/{name}.go with DTO fields"),
        format!("Run `crudgen go2ts {dir}/types` to generate TypeScript DTO types"),
        format!("Refine repository methods in repo/db/{name}.go"),
        format!("Refine service methods in service/{name}.go"),
        "Create views in views/".to_string(),
    ]
}

fn report_json(report: &ScaffoldReport) -> Value {
    json!({
        "domain": report.domain,
        "directory": report.domain_dir,
        "created": report
            .created
            .iter()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .collect::<Vec<_>>(),
        "generated": report.generated,
        "import": report.import_line.trim(),
        "registered": report
            .registered
            .iter()
            .map(|(kind, path)| json!({ "generator": kind.config_key(), "path": path }))
            .collect::<Vec<_>>(),
        "warnings": report.warnings,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crudgen_core::domain::GeneratorKind;

    use super::*;

    fn report() -> ScaffoldReport {
        let created = [
            "api", "models", "repo", "repo/db", "service", "types", "views",
            "api/comment.go", "api/comment.ts", "models/comment.go", "repo/comment.go",
            "repo/db/comment.go", "service/comment.go", "types/comment.go", "errors.go",
        ];
        ScaffoldReport {
            domain: "comment".into(),
            domain_dir: "domains/comment".into(),
            created: created.iter().map(PathBuf::from).collect(),
            generated: vec![
                "domains/comment/models/index.ts".into(),
                "domains/comment/types/index.ts".into(),
                "domains/comment/tables".into(),
            ],
            import_line: "\t_ \"github.com/acme/app/domains/comment/api\"".into(),
            registered: vec![(GeneratorKind::TypeSync, "./domains/comment/types".into())],
            warnings: Vec::new(),
        }
    }

    #[test]
    fn summary_lists_leaves_with_descriptions() {
        let entries = summary_entries(&report());
        let paths: Vec<&str> = entries.iter().map(|(p, _)| p.as_str()).collect();

        assert_eq!(
            paths,
            [
                "api/comment.go",
                "api/comment.ts",
                "models/comment.go",
                "models/index.ts",
                "repo/comment.go",
                "repo/db/comment.go",
                "service/comment.go",
                "tables/",
                "types/comment.go",
                "types/index.ts",
                "views/",
                "errors.go",
            ]
        );
        assert_eq!(entries[1].1, "(TypeScript API client)");
        assert_eq!(entries[5].1, "(database implementation)");
        assert_eq!(entries[11].1, "(domain errors)");
    }

    #[test]
    fn describe_unknown_path_is_none() {
        assert_eq!(describe("docs/readme.md"), None);
        assert_eq!(describe("types/index.ts"), Some("DTOs in TypeScript"));
    }

    #[test]
    fn next_steps_use_the_domain_directory() {
        let steps = next_steps(&report());
        assert_eq!(steps.len(), 8);
        assert!(steps[1].contains("crudgen go2ts domains/comment/models"));
    }

    #[test]
    fn json_report_has_trimmed_import_and_generator_keys() {
        let value = report_json(&report());
        assert_eq!(value["import"], "_ \"github.com/acme/app/domains/comment/api\"");
        assert_eq!(value["registered"][0]["generator"], "go2ts");
        assert_eq!(value["created"].as_array().unwrap().len(), 15);
    }
}
