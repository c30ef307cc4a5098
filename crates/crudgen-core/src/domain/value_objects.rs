//! Domain value objects: DomainName, GeneratorKind.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity.
//! `DomainName` stores only the base name; every derived case form is
//! computed on demand, so none of them can drift from the source.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::casing::{pluralize, to_camel_case, to_pascal_case};
use crate::domain::error::DomainError;

// ── DomainName ───────────────────────────────────────────────────────────────

/// The name of a vertical slice of the application, e.g. `article`.
///
/// Invariant: non-empty, starts with a lowercase ASCII letter, and contains
/// only ASCII letters, digits, `_` and `-`. Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DomainName(String);

impl DomainName {
    /// Validate and wrap a domain name.
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();

        let Some(first) = raw.chars().next() else {
            return Err(DomainError::EmptyDomainName);
        };

        if !first.is_ascii_lowercase() {
            return Err(DomainError::InvalidDomainName {
                name: raw,
                reason: "must start with a lowercase letter".into(),
            });
        }

        if let Some(bad) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(DomainError::InvalidDomainName {
                reason: format!("character '{bad}' is not allowed"),
                name: raw,
            });
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `article` → `articles`
    pub fn plural(&self) -> String {
        pluralize(&self.0)
    }

    /// `blog_post` → `BlogPost`
    pub fn pascal(&self) -> String {
        to_pascal_case(&self.0)
    }

    /// `blog_post` → `BlogPosts`
    pub fn pascal_plural(&self) -> String {
        to_pascal_case(&self.plural())
    }

    /// `blog_post` → `blogPost`
    pub fn camel(&self) -> String {
        to_camel_case(&self.0)
    }

    /// `blog_post` → `blogPosts`
    pub fn camel_plural(&self) -> String {
        to_camel_case(&self.plural())
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DomainName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── GeneratorKind ────────────────────────────────────────────────────────────

/// One of the two external generator integrations.
///
/// Each kind owns its own manifest section, its own lock and its own
/// temporary artifact path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeneratorKind {
    /// Go structs → TypeScript definitions (`tygo`).
    #[serde(rename = "go2ts")]
    TypeSync,
    /// Go models → GORM query helpers (`gorm gen`).
    #[serde(rename = "orm-gen")]
    OrmTables,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 2] = [Self::TypeSync, Self::OrmTables];

    /// Top-level key of this kind's section in the project manifest.
    pub const fn config_key(&self) -> &'static str {
        match self {
            Self::TypeSync => "go2ts",
            Self::OrmTables => "orm-gen",
        }
    }

    /// Short human description used in usage text and logs.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::TypeSync => "Generate TypeScript definitions for the given directory",
            Self::OrmTables => "Generate GORM tables for the given directory",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_key())
    }
}

impl FromStr for GeneratorKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "go2ts" | "types" | "tygo" => Ok(Self::TypeSync),
            "orm-gen" | "orm" | "tables" | "gorm" => Ok(Self::OrmTables),
            _ => Err(DomainError::UnknownGenerator(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_forms_for_simple_name() {
        let name = DomainName::parse("article").unwrap();
        assert_eq!(name.plural(), "articles");
        assert_eq!(name.pascal(), "Article");
        assert_eq!(name.pascal_plural(), "Articles");
        assert_eq!(name.camel(), "article");
        assert_eq!(name.camel_plural(), "articles");
    }

    #[test]
    fn derived_forms_for_compound_name() {
        let name = DomainName::parse("blog_category").unwrap();
        assert_eq!(name.plural(), "blog_categories");
        assert_eq!(name.pascal(), "BlogCategory");
        assert_eq!(name.pascal_plural(), "BlogCategories");
        assert_eq!(name.camel(), "blogCategory");
        assert_eq!(name.camel_plural(), "blogCategories");
    }

    #[test]
    fn rejects_empty_and_malformed() {
        assert_eq!(DomainName::parse(""), Err(DomainError::EmptyDomainName));
        assert!(DomainName::parse("Article").is_err());
        assert!(DomainName::parse("1st").is_err());
        assert!(DomainName::parse("blog post").is_err());
        assert!(DomainName::parse("../etc").is_err());
    }

    #[test]
    fn generator_kind_round_trips_through_config_key() {
        for kind in GeneratorKind::ALL {
            assert_eq!(kind.config_key().parse::<GeneratorKind>().unwrap(), kind);
        }
        assert!("prisma".parse::<GeneratorKind>().is_err());
    }
}
