//! # crudgen CLI
//!
//! Domain scaffolding and code generation for Go + TypeScript CRUD apps.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (defaults, user file, `crudgen.toml`, environment).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                         |
//! |------|-------------------------------------------------|
//! |  0   | Success                                         |
//! |  1   | User, validation or internal error              |
//! |  2   | Argument parse error                            |
//! |  3   | External generator failed or is not installed   |
//! |  4   | Configuration or project-structure error        |

use std::process::ExitCode;

use clap::Parser;
use crudgen_core::domain::GeneratorKind;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    logging::{LogStyle, init_logging},
    output::OutputManager,
    wiring::Services,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod wiring;

fn main() -> ExitCode {
    // Missing .env is fine.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version requests land here too, with exit code 0.
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2));
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    let style = match &cli.command {
        Commands::Go2ts(args) | Commands::OrmGen(args) if args.watch => LogStyle::Session,
        _ => LogStyle::OneShot,
    };
    if let Err(e) = init_logging(&cli.global, style) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    // ── 3. Load configuration ─────────────────────────────────────────────
    let project_dir = cli.global.project_dir();
    let config = match AppConfig::load(cli.global.config.as_ref(), &project_dir) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e:#}");
            eprintln!("Error: failed to load configuration: {e:#}");
            return ExitCode::from(4);
        }
    };

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);
    let verbose = cli.global.verbose > 0;
    let colored = output.supports_color();

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    let result = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .with_cli_context(|| "Failed to start the async runtime")
        .and_then(|runtime| runtime.block_on(run(cli, config, output)));

    match result {
        Ok(()) => {
            info!("crudgen completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose, colored),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
async fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::NewDomain(args) => {
            commands::new_domain::execute(args, &Services::new(config), &output).await
        }
        Commands::Go2ts(args) => {
            let services = Services::new(config);
            commands::generate::execute(GeneratorKind::TypeSync, args, &services, &output).await
        }
        Commands::OrmGen(args) => {
            let services = Services::new(config);
            commands::generate::execute(GeneratorKind::OrmTables, args, &services, &output).await
        }
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(
            cmd,
            &config,
            cli.global.config.as_ref(),
            &cli.global.project_dir(),
            &output,
        ),
    }
}

/// Translate a `CliError` into a user message and an appropriate exit code.
fn handle_error(err: CliError, verbose: bool, colored: bool) -> ExitCode {
    err.log();

    // Written to stderr so the message survives a redirected stdout.
    let msg = if colored && std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────
