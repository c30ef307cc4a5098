//! Domain scaffold template and its rendering context.
//!
//! ## Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  DomainTemplate                                              │
//! │  ├── directories: Vec<DirectorySpec>   (views/, repo/db/ …)  │
//! │  └── files: Vec<FileSpec>              (path + body)         │
//! │        path and body both carry {{PLACEHOLDERS}}             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  RenderContext (Value Object)                                │
//! │  └── {{DOMAIN_PASCAL}} -> "BlogPost", {{MODULE}} -> "x/y"    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The template holds `&'static str` sources because every template ships
//! inside the binary. Rendering is a pure function of the context, so the
//! same context always yields byte-identical output.

use std::collections::BTreeMap;

use crate::domain::value_objects::DomainName;

/// Placeholder names understood by [`RenderContext`].
pub mod vars {
    pub const DOMAIN: &str = "DOMAIN";
    pub const DOMAIN_PLURAL: &str = "DOMAIN_PLURAL";
    pub const DOMAIN_PASCAL: &str = "DOMAIN_PASCAL";
    pub const DOMAIN_PASCAL_PLURAL: &str = "DOMAIN_PASCAL_PLURAL";
    pub const DOMAIN_CAMEL: &str = "DOMAIN_CAMEL";
    pub const DOMAIN_CAMEL_PLURAL: &str = "DOMAIN_CAMEL_PLURAL";
    pub const MODULE: &str = "MODULE";
}

/// The full set of files and directories that make up one domain.
#[derive(Debug, Clone, Default)]
pub struct DomainTemplate {
    pub directories: Vec<DirectorySpec>,
    pub files: Vec<FileSpec>,
}

impl DomainTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directory(mut self, path: &'static str) -> Self {
        self.directories.push(DirectorySpec { path });
        self
    }

    pub fn file(mut self, path: &'static str, body: &'static str) -> Self {
        self.files.push(FileSpec { path, body });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.files.is_empty()
    }
}

/// A directory to create, relative to the domain root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectorySpec {
    pub path: &'static str,
}

/// A file to render. Both `path` and `body` may contain placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSpec {
    pub path: &'static str,
    pub body: &'static str,
}

/// Context for template rendering.
///
/// A **Value Object** containing every name form a domain template needs.
/// All forms are derived from the [`DomainName`] at construction.
///
/// ## Built-in Variables
///
/// | Variable               | Example (`blog_post`) |
/// |------------------------|-----------------------|
/// | `DOMAIN`               | `blog_post`           |
/// | `DOMAIN_PLURAL`        | `blog_posts`          |
/// | `DOMAIN_PASCAL`        | `BlogPost`            |
/// | `DOMAIN_PASCAL_PLURAL` | `BlogPosts`           |
/// | `DOMAIN_CAMEL`         | `blogPost`            |
/// | `DOMAIN_CAMEL_PLURAL`  | `blogPosts`           |
/// | `MODULE`               | `github.com/acme/app` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    domain: DomainName,
    variables: BTreeMap<&'static str, String>,
}

impl RenderContext {
    pub fn new(domain: &DomainName, module: impl Into<String>) -> Self {
        let mut variables = BTreeMap::new();
        variables.insert(vars::DOMAIN, domain.as_str().to_string());
        variables.insert(vars::DOMAIN_PLURAL, domain.plural());
        variables.insert(vars::DOMAIN_PASCAL, domain.pascal());
        variables.insert(vars::DOMAIN_PASCAL_PLURAL, domain.pascal_plural());
        variables.insert(vars::DOMAIN_CAMEL, domain.camel());
        variables.insert(vars::DOMAIN_CAMEL_PLURAL, domain.camel_plural());
        variables.insert(vars::MODULE, module.into());

        Self {
            domain: domain.clone(),
            variables,
        }
    }

    pub fn domain(&self) -> &DomainName {
        &self.domain
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace every `{{VARIABLE}}` placeholder in `template`.
    ///
    /// - `{{UNKNOWN}}` is left as-is.
    /// - Variables are substituted in key order, and no value contains a
    ///   placeholder, so the result does not depend on substitution order.
    pub fn render(&self, template: &str) -> String {
        let mut result = template.to_string();
        for (key, value) in &self.variables {
            let placeholder = format!("{{{{{key}}}}}");
            result = result.replace(&placeholder, value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(name: &str) -> RenderContext {
        RenderContext::new(&DomainName::parse(name).unwrap(), "github.com/acme/app")
    }

    #[test]
    fn substitutes_every_form() {
        let out = ctx("blog_post").render(
            "{{DOMAIN}} {{DOMAIN_PLURAL}} {{DOMAIN_PASCAL}} {{DOMAIN_PASCAL_PLURAL}} \
             {{DOMAIN_CAMEL}} {{DOMAIN_CAMEL_PLURAL}} {{MODULE}}",
        );
        assert_eq!(
            out,
            "blog_post blog_posts BlogPost BlogPosts blogPost blogPosts github.com/acme/app"
        );
    }

    #[test]
    fn unknown_placeholders_survive() {
        assert_eq!(ctx("tag").render("{{NOPE}} {{DOMAIN}}"), "{{NOPE}} tag");
    }

    #[test]
    fn go_braces_are_untouched() {
        let src = "return &common.PaginatedResult[models.{{DOMAIN_PASCAL}}]{Total: 0, List: []models.{{DOMAIN_PASCAL}}{}}, nil";
        assert_eq!(
            ctx("tag").render(src),
            "return &common.PaginatedResult[models.Tag]{Total: 0, List: []models.Tag{}}, nil"
        );
    }

    #[test]
    fn template_builder_collects_entries() {
        let t = DomainTemplate::new()
            .directory("views")
            .file("api/{{DOMAIN}}.go", "package api");
        assert_eq!(t.directories.len(), 1);
        assert_eq!(t.files[0].path, "api/{{DOMAIN}}.go");
        assert!(!t.is_empty());
    }
}
