//! `crudgen go2ts` and `crudgen orm-gen`: one-shot generation or watch mode.

use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crudgen_core::{
    application::ports::WatchReporter, domain::GeneratorKind, error::CrudgenError,
};

use crate::{
    cli::GenerateArgs,
    error::CliResult,
    output::OutputManager,
    wiring::Services,
};

/// Execute a generator command for `kind`.
///
/// With neither a directory nor `--watch` the usage text is printed and the
/// command succeeds.
#[instrument(skip_all, fields(kind = %kind))]
pub async fn execute(
    kind: GeneratorKind,
    args: GenerateArgs,
    services: &Services,
    output: &OutputManager,
) -> CliResult<()> {
    if args.watch {
        return watch(kind, services, output).await;
    }

    let Some(dir) = args.dir else {
        for line in usage(kind) {
            output.print(&line)?;
        }
        return Ok(());
    };

    let report = services.generator(kind).generate(&dir).await?;
    output.success(&format!("{} to: {}", done_message(kind), report.output))?;
    Ok(())
}

async fn watch(kind: GeneratorKind, services: &Services, output: &OutputManager) -> CliResult<()> {
    let reporter = Arc::new(ConsoleReporter::new(output.clone()));
    let mut supervisor = services.supervisor(kind, reporter);

    output.info("Starting in watch mode...")?;
    supervisor.run(shutdown_signal()).await?;
    Ok(())
}

/// Resolves on Ctrl-C. If the handler cannot be installed the session runs
/// until the process is killed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

fn usage(kind: GeneratorKind) -> Vec<String> {
    let key = kind.config_key();
    vec![
        "Usage:".to_string(),
        format!("  crudgen {key} <dir>         - {}", kind.description()),
        format!("  crudgen {key} --watch       - Start watch mode"),
    ]
}

fn done_message(kind: GeneratorKind) -> &'static str {
    match kind {
        GeneratorKind::TypeSync => "Successfully generated TypeScript",
        GeneratorKind::OrmTables => "Successfully generated GORM tables",
    }
}

// ── Watch output ──────────────────────────────────────────────────────────────

/// Renders watch-session progress on the terminal.
struct ConsoleReporter {
    output: OutputManager,
}

impl ConsoleReporter {
    fn new(output: OutputManager) -> Self {
        Self { output }
    }

    fn emit(&self, result: io::Result<()>) {
        if let Err(e) = result {
            debug!(error = %e, "Could not write watch output");
        }
    }
}

impl WatchReporter for ConsoleReporter {
    fn watching(&self, _kind: GeneratorKind, paths: &[String]) {
        self.emit(self.output.info("Watching Go files for changes..."));
        for path in paths {
            self.emit(self.output.print(&format!("   {path}")));
        }
    }

    fn change_detected(&self, path: &Path) {
        self.emit(self.output.clear_screen());
        self.emit(
            self.output
                .info(&format!("Detected change in Go file: {}", path.display())),
        );
    }

    fn config_changed(&self, kind: GeneratorKind, paths: &[String]) {
        self.emit(
            self.output
                .info(&format!("{kind} configuration changed, restarting watcher...")),
        );
        for path in paths {
            self.emit(self.output.print(&format!("   {path}")));
        }
    }

    fn generated(&self, kind: GeneratorKind, output: &str) {
        self.emit(
            self.output
                .success(&format!("{} to: {output}", done_message(kind))),
        );
    }

    fn generation_failed(&self, target: &str, error: &CrudgenError) {
        self.emit(self.output.error(&format!("Generation failed for {target}: {error}")));
    }

    fn stopped(&self, _kind: GeneratorKind) {
        self.emit(self.output.info("Watchers stopped"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_names_the_command_and_watch_flag() {
        let lines = usage(GeneratorKind::OrmTables);
        assert_eq!(lines[0], "Usage:");
        assert!(lines[1].starts_with("  crudgen orm-gen <dir>"));
        assert!(lines[1].ends_with(GeneratorKind::OrmTables.description()));
        assert!(lines[2].contains("crudgen orm-gen --watch"));
    }

    #[test]
    fn done_messages_differ_per_kind() {
        assert_ne!(
            done_message(GeneratorKind::TypeSync),
            done_message(GeneratorKind::OrmTables)
        );
    }
}
