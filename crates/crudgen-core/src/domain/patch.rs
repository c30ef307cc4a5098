//! Pure text transforms behind the configuration patcher.
//!
//! Each function takes the current file contents and returns the new
//! contents (or a structural error) without touching the disk. The
//! application layer owns the read and the write, so a structural error
//! is always detected before anything is written.

use serde::Serialize;
use serde_json::{Value, ser::PrettyFormatter};

use crate::domain::error::DomainError;

/// Indentation used when rewriting the JSON manifest.
pub const MANIFEST_INDENT: &[u8] = b"    ";

/// Insert `new_line` directly before the first line that closes a block.
///
/// The block opens at the first line whose trimmed text starts with
/// `start_prefix`; it closes at the next line whose trimmed text equals
/// `end_line`. Lines are split on `\n` and joined back with `\n`.
///
/// Existing occurrences of `new_line` are not checked for, so calling this
/// twice inserts the line twice.
pub fn insert_line_in_block(
    text: &str,
    start_prefix: &str,
    end_line: &str,
    new_line: &str,
) -> Result<String, DomainError> {
    let mut lines: Vec<&str> = text.split('\n').collect();

    let end = lines
        .iter()
        .position(|l| l.trim().starts_with(start_prefix))
        .and_then(|start| {
            lines[start + 1..]
                .iter()
                .position(|l| l.trim() == end_line)
                .map(|offset| start + 1 + offset)
        })
        .ok_or_else(|| DomainError::BlockNotFound {
            start: start_prefix.to_string(),
            end: end_line.to_string(),
        })?;

    lines.insert(end, new_line);
    Ok(lines.join("\n"))
}

/// Append `entry` to `manifest[object_key][array_key]` unless present.
///
/// Returns whether the array changed.
pub fn append_unique(
    manifest: &mut Value,
    object_key: &str,
    array_key: &str,
    entry: &str,
) -> Result<bool, DomainError> {
    let array = manifest
        .get_mut(object_key)
        .filter(|v| v.is_object())
        .ok_or_else(|| DomainError::MissingSection {
            key: object_key.to_string(),
        })?
        .get_mut(array_key)
        .and_then(Value::as_array_mut)
        .ok_or_else(|| DomainError::MissingSection {
            key: format!("{object_key}.{array_key}"),
        })?;

    if array.iter().any(|v| v.as_str() == Some(entry)) {
        return Ok(false);
    }

    array.push(Value::String(entry.to_string()));
    Ok(true)
}

pub fn parse_json(text: &str) -> Result<Value, DomainError> {
    serde_json::from_str(text).map_err(|e| DomainError::MalformedJson(e.to_string()))
}

/// Serialize with four-space indentation and a trailing newline, keeping
/// key order.
pub fn to_pretty_json(value: &Value) -> Result<String, DomainError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(MANIFEST_INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| DomainError::MalformedJson(e.to_string()))?;

    let mut out = String::from_utf8(buf).map_err(|e| DomainError::MalformedJson(e.to_string()))?;
    out.push('\n');
    Ok(out)
}

/// Module path from the first `module <path>` line of a `go.mod` file.
pub fn parse_module_name(go_mod: &str) -> Result<String, DomainError> {
    go_mod
        .lines()
        .find_map(|line| {
            let rest = line.strip_prefix("module")?;
            if !rest.starts_with(char::is_whitespace) {
                return None;
            }
            rest.split_whitespace().next().map(str::to_string)
        })
        .ok_or(DomainError::MissingModuleDirective)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const MAIN_GO: &str = "package main\n\nimport (\n\t\"log\"\n\n\t_ \"app/domains/article/api\"\n)\n\nfunc main() {}\n";

    #[test]
    fn inserts_before_closing_paren() {
        let out =
            insert_line_in_block(MAIN_GO, "import (", ")", "\t_ \"app/domains/tag/api\"").unwrap();
        assert!(out.contains("\t_ \"app/domains/article/api\"\n\t_ \"app/domains/tag/api\"\n)\n"));
        assert!(out.ends_with("func main() {}\n"));
    }

    #[test]
    fn repeated_insert_duplicates_line() {
        let line = "\t_ \"app/domains/tag/api\"";
        let once = insert_line_in_block(MAIN_GO, "import (", ")", line).unwrap();
        let twice = insert_line_in_block(&once, "import (", ")", line).unwrap();
        assert_eq!(twice.matches(line).count(), 2);
    }

    #[test]
    fn missing_block_is_structural_error() {
        let err = insert_line_in_block("package main\nimport \"fmt\"\n", "import (", ")", "x");
        assert!(matches!(err, Err(DomainError::BlockNotFound { .. })));

        let unclosed = insert_line_in_block("import (\n\t\"fmt\"\n", "import (", ")", "x");
        assert!(unclosed.is_err());
    }

    #[test]
    fn close_marker_before_open_is_ignored() {
        let text = ")\nimport (\n\t\"a\"\n)";
        let out = insert_line_in_block(text, "import (", ")", "\t\"b\"").unwrap();
        assert_eq!(out, ")\nimport (\n\t\"a\"\n\t\"b\"\n)");
    }

    #[test]
    fn append_unique_is_idempotent() {
        let mut manifest = json!({ "go2ts": { "paths": ["./a"] } });
        assert!(append_unique(&mut manifest, "go2ts", "paths", "./b").unwrap());
        assert!(!append_unique(&mut manifest, "go2ts", "paths", "./b").unwrap());
        assert_eq!(manifest["go2ts"]["paths"], json!(["./a", "./b"]));
    }

    #[test]
    fn append_unique_requires_section_and_array() {
        let mut manifest = json!({ "go2ts": { "paths": "nope" } });
        assert!(append_unique(&mut manifest, "orm-gen", "paths", "x").is_err());
        assert!(append_unique(&mut manifest, "go2ts", "paths", "x").is_err());
    }

    #[test]
    fn pretty_json_uses_four_spaces_and_keeps_order() {
        let value = parse_json(r#"{"name":"app","go2ts":{"paths":["./a"]},"empty":[]}"#).unwrap();
        let out = to_pretty_json(&value).unwrap();
        assert_eq!(
            out,
            "{\n    \"name\": \"app\",\n    \"go2ts\": {\n        \"paths\": [\n            \"./a\"\n        ]\n    },\n    \"empty\": []\n}\n"
        );
    }

    #[test]
    fn module_name_from_go_mod() {
        let go_mod = "// header\nmodule github.com/acme/app\n\ngo 1.22\n";
        assert_eq!(parse_module_name(go_mod).unwrap(), "github.com/acme/app");
        assert_eq!(
            parse_module_name("go 1.22\n"),
            Err(DomainError::MissingModuleDirective)
        );
        assert!(parse_module_name("modules x\n").is_err());
    }
}
