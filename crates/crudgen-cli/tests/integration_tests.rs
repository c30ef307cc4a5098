//! Integration tests for the crudgen binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MISSING_PROGRAM: &str = "crudgen-test-no-such-generator";

/// A throwaway Go + TypeScript project.
fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::write(root.join("go.mod"), "module github.com/acme/app\n\ngo 1.22\n").unwrap();
    fs::create_dir_all(root.join("server/main")).unwrap();
    fs::write(
        root.join("server/main/main.go"),
        "package main\n\nimport (\n\t\"fmt\"\n)\n\nfunc main() { fmt.Println(\"up\") }\n",
    )
    .unwrap();
    fs::write(
        root.join("package.json"),
        r#"{
    "name": "app",
    "go2ts": {
        "paths": []
    },
    "orm-gen": {
        "paths": []
    }
}
"#,
    )
    .unwrap();
    temp
}

/// The binary, isolated from the caller's environment and user config.
fn crudgen(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("crudgen");
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("HOME", dir)
        .env("NO_COLOR", "1")
        .env("CRUDGEN_GENERATORS__TYGO_PROGRAM", MISSING_PROGRAM)
        .env("CRUDGEN_GENERATORS__GORM_PROGRAM", MISSING_PROGRAM)
        .env("CRUDGEN_GENERATORS__ARTIFACT_DIR", dir.join(".tmp"));
    cmd
}

// ── surface ───────────────────────────────────────────────────────────────────

#[test]
fn help_lists_commands() {
    let temp = TempDir::new().unwrap();
    crudgen(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("new-domain"))
        .stdout(predicate::str::contains("go2ts"))
        .stdout(predicate::str::contains("orm-gen"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    crudgen(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_subcommand_exits_two() {
    let temp = TempDir::new().unwrap();
    crudgen(temp.path()).arg("frobnicate").assert().code(2);
}

#[test]
fn bash_completions_mention_binary() {
    let temp = TempDir::new().unwrap();
    crudgen(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("crudgen"));
}

#[test]
fn config_get_reads_environment_override() {
    let temp = TempDir::new().unwrap();
    crudgen(temp.path())
        .args(["config", "get", "generators.gorm_program"])
        .assert()
        .success()
        .stdout(predicate::str::contains(MISSING_PROGRAM));
}

#[test]
fn config_get_reads_project_file() {
    let temp = project();
    fs::write(
        temp.path().join("crudgen.toml"),
        "[project]\ndomains_dir = \"modules\"\n",
    )
    .unwrap();

    crudgen(temp.path())
        .args(["config", "get", "project.domains_dir"])
        .assert()
        .success()
        .stdout(predicate::str::diff("modules\n"));
}

#[test]
fn explicit_missing_config_file_exits_four() {
    let temp = TempDir::new().unwrap();
    crudgen(temp.path())
        .args(["-c", "nope.toml", "config", "list"])
        .assert()
        .code(4);
}

// ── new-domain ────────────────────────────────────────────────────────────────

#[test]
fn new_domain_without_name_exits_one() {
    let temp = project();
    crudgen(temp.path())
        .arg("new-domain")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Please provide a domain name"))
        .stderr(predicate::str::contains("crudgen new-domain <NAME>"));
}

#[test]
fn new_domain_rejects_invalid_name() {
    let temp = project();
    crudgen(temp.path())
        .args(["new-domain", "Bad/Name"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Validation failed"));

    assert!(!temp.path().join("domains").exists());
}

#[test]
fn new_domain_refuses_existing_directory() {
    let temp = project();
    fs::create_dir_all(temp.path().join("domains/comment")).unwrap();

    crudgen(temp.path())
        .args(["new-domain", "comment"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    assert!(!temp.path().join("domains/comment/api").exists());
}

#[test]
fn new_domain_scaffolds_and_registers() {
    let temp = project();
    let root = temp.path();

    crudgen(root)
        .args(["new-domain", "comment"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Domain \"comment\" has been successfully created!",
        ))
        .stdout(predicate::str::contains("Next steps:"));

    for file in [
        "api/comment.go",
        "api/comment.ts",
        "models/comment.go",
        "repo/comment.go",
        "repo/db/comment.go",
        "service/comment.go",
        "types/comment.go",
        "errors.go",
    ] {
        assert!(root.join("domains/comment").join(file).is_file(), "{file}");
    }
    assert!(root.join("domains/comment/views").is_dir());

    let main_go = fs::read_to_string(root.join("server/main/main.go")).unwrap();
    assert!(main_go.contains("_ \"github.com/acme/app/domains/comment/api\""));

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(root.join("package.json")).unwrap()).unwrap();
    for key in ["go2ts", "orm-gen"] {
        let paths = manifest[key]["paths"].as_array().unwrap();
        assert!(paths.contains(&"./domains/comment/models".into()), "{key}");
        assert!(paths.contains(&"./domains/comment/types".into()), "{key}");
    }
}

#[test]
fn new_domain_reports_generator_failures_as_warnings() {
    let temp = project();
    crudgen(temp.path())
        .args(["new-domain", "comment"])
        .assert()
        .success()
        .stdout(predicate::str::contains(MISSING_PROGRAM));
}

#[test]
fn new_domain_json_output() {
    let temp = project();
    let out = crudgen(temp.path())
        .args(["--output-format", "json", "new-domain", "blog_post"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["domain"], "blog_post");
    assert_eq!(report["directory"], "domains/blog_post");
}

#[test]
fn new_domain_without_import_block_is_partial() {
    let temp = project();
    fs::write(
        temp.path().join("server/main/main.go"),
        "package main\n\nfunc main() {}\n",
    )
    .unwrap();

    crudgen(temp.path())
        .args(["new-domain", "comment"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("incomplete"));

    assert!(temp.path().join("domains/comment/api/comment.go").exists());
}

#[test]
fn new_domain_honours_project_dir_flag() {
    let temp = project();
    let elsewhere = TempDir::new().unwrap();

    crudgen(elsewhere.path())
        .args(["-C"])
        .arg(temp.path())
        .args(["new-domain", "tag"])
        .assert()
        .success();

    assert!(temp.path().join("domains/tag/errors.go").is_file());
}

// ── go2ts / orm-gen ───────────────────────────────────────────────────────────

#[test]
fn generator_without_arguments_prints_usage() {
    let temp = project();
    crudgen(temp.path())
        .arg("go2ts")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("crudgen go2ts --watch"));
}

#[test]
fn directory_and_watch_conflict() {
    let temp = project();
    crudgen(temp.path())
        .args(["orm-gen", "domains/a/models", "--watch"])
        .assert()
        .code(2);
}

#[test]
fn missing_generator_exits_three() {
    let temp = project();
    crudgen(temp.path())
        .args(["orm-gen", "domains/a/models"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains(MISSING_PROGRAM));
}

#[test]
fn watch_without_manifest_section_exits_four() {
    let temp = project();
    fs::write(temp.path().join("package.json"), "{ \"name\": \"app\" }\n").unwrap();

    crudgen(temp.path())
        .args(["go2ts", "--watch"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("go2ts"));
}

#[test]
fn watch_with_malformed_manifest_exits_four() {
    let temp = project();
    fs::write(temp.path().join("package.json"), "{ not json").unwrap();

    crudgen(temp.path())
        .args(["orm-gen", "-w"])
        .assert()
        .code(4);
}
