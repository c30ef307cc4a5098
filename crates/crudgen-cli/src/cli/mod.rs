//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "crudgen",
    bin_name = "crudgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Domain scaffolding and code generation for Go + TypeScript CRUD apps",
    long_about = "crudgen creates new domains (Go handlers, models, repositories, \
                  services and a TypeScript client) and keeps generated TypeScript \
                  types and GORM table helpers in sync with the Go sources.",
    after_help = "EXAMPLES:\n\
        \x20 crudgen new-domain comment\n\
        \x20 crudgen go2ts domains/comment/models\n\
        \x20 crudgen orm-gen --watch\n\
        \x20 crudgen completions bash > /usr/share/bash-completion/completions/crudgen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scaffold a new domain.
    #[command(
        name = "new-domain",
        visible_alias = "nd",
        about = "Scaffold a new domain",
        after_help = "EXAMPLES:\n\
            \x20 crudgen new-domain comment\n\
            \x20 crudgen -C ../app new-domain blog_post"
    )]
    NewDomain(NewDomainArgs),

    /// Generate TypeScript definitions from Go sources.
    #[command(
        name = "go2ts",
        about = "Generate TypeScript definitions for a directory, or watch",
        after_help = "EXAMPLES:\n\
            \x20 crudgen go2ts domains/comment/models\n\
            \x20 crudgen go2ts --watch"
    )]
    Go2ts(GenerateArgs),

    /// Generate GORM table helpers from Go models.
    #[command(
        name = "orm-gen",
        about = "Generate GORM tables for a directory, or watch",
        after_help = "EXAMPLES:\n\
            \x20 crudgen orm-gen domains/comment/models\n\
            \x20 crudgen orm-gen -w"
    )]
    OrmGen(GenerateArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 crudgen completions bash > ~/.local/share/bash-completion/completions/crudgen\n\
            \x20 crudgen completions zsh  > ~/.zfunc/_crudgen\n\
            \x20 crudgen completions fish > ~/.config/fish/completions/crudgen.fish"
    )]
    Completions(CompletionsArgs),

    /// Show the effective configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 crudgen config get generators.tygo_program\n\
            \x20 crudgen config list\n\
            \x20 crudgen config path"
    )]
    Config(ConfigCommands),
}

// ── new-domain ────────────────────────────────────────────────────────────────

/// Arguments for `crudgen new-domain`.
#[derive(Debug, Args)]
pub struct NewDomainArgs {
    /// Domain name: lowercase letters, digits, `_` and `-`, starting with a
    /// letter. Becomes the directory name under `domains/`.
    ///
    /// Optional at the parser level so a missing name is reported with the
    /// tool's own message and exit code.
    #[arg(value_name = "NAME", help = "Domain name, e.g. comment or blog_post")]
    pub name: Option<String>,
}

// ── go2ts / orm-gen ───────────────────────────────────────────────────────────

/// Arguments shared by the generator commands.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Directory to generate for, relative to the project root.
    #[arg(value_name = "DIR", conflicts_with = "watch")]
    pub dir: Option<String>,

    /// Watch the directories listed in the manifest and regenerate on change.
    #[arg(short = 'w', long = "watch", help = "Start watch mode")]
    pub watch: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `crudgen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `crudgen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `generators.tygo_program`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the configuration files that are consulted, in load order.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_new_domain() {
        let cli = Cli::parse_from(["crudgen", "new-domain", "comment"]);
        match cli.command {
            Commands::NewDomain(args) => assert_eq!(args.name.as_deref(), Some("comment")),
            other => panic!("expected NewDomain, got {other:?}"),
        }
    }

    #[test]
    fn new_domain_name_is_optional_at_parse_time() {
        let cli = Cli::parse_from(["crudgen", "new-domain"]);
        assert!(matches!(cli.command, Commands::NewDomain(NewDomainArgs { name: None })));
    }

    #[test]
    fn parse_generator_commands() {
        let cli = Cli::parse_from(["crudgen", "go2ts", "domains/a/models"]);
        assert!(matches!(
            cli.command,
            Commands::Go2ts(GenerateArgs { ref dir, watch: false })
                if dir.as_deref() == Some("domains/a/models")
        ));

        let cli = Cli::parse_from(["crudgen", "orm-gen", "-w"]);
        match cli.command {
            Commands::OrmGen(args) => {
                assert!(args.watch);
                assert!(args.dir.is_none());
            }
            other => panic!("expected OrmGen, got {other:?}"),
        }
    }

    #[test]
    fn dir_and_watch_conflict() {
        let result = Cli::try_parse_from(["crudgen", "go2ts", "domains/a", "--watch"]);
        assert!(result.is_err());
    }

    #[test]
    fn project_dir_is_global() {
        let cli = Cli::parse_from(["crudgen", "go2ts", "-C", "/srv/app", "--watch"]);
        assert_eq!(cli.global.project_dir(), std::path::PathBuf::from("/srv/app"));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["crudgen", "--quiet", "--verbose", "config", "list"]);
        assert!(result.is_err());
    }
}
