//! Process runner adapters.

use std::collections::VecDeque;
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use crudgen_core::{
    application::{
        ApplicationError,
        ports::{ProcessOutput, ProcessRunner},
    },
    domain::GenerationCommand,
    error::{CrudgenError, CrudgenResult},
};
use tokio::process::Command;
use tokio::time::Instant;
use tracing::{debug, instrument};

/// Runs generators as child processes with `tokio::process`.
///
/// Output is captured, stdin is closed. A running child is not killed if
/// the awaiting task goes away.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessRunner;

impl TokioProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    #[instrument(skip_all, fields(program = %command.program))]
    async fn run(&self, command: &GenerationCommand) -> CrudgenResult<ProcessOutput> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &command.working_dir {
            cmd.current_dir(dir);
        }

        let output = cmd
            .output()
            .await
            .map_err(|e| ApplicationError::GeneratorUnavailable {
                program: command.program.clone(),
                reason: e.to_string(),
            })?;

        debug!(code = ?output.status.code(), "Generator exited");
        Ok(ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

// ── Test double ──────────────────────────────────────────────────────────────

/// One recorded invocation of a [`ScriptedRunner`].
#[derive(Debug, Clone)]
pub struct RecordedRun {
    pub command: GenerationCommand,
    pub started: Instant,
    pub finished: Instant,
}

type RunHook = Box<dyn Fn(&GenerationCommand) + Send + Sync>;

/// A process runner that replays canned outputs.
///
/// Replies are consumed in order; once they run out every call succeeds.
/// Each call takes `delay` to complete and is recorded with its start and
/// finish instants so tests can check calls never overlapped.
#[derive(Clone, Default)]
pub struct ScriptedRunner {
    inner: Arc<Mutex<ScriptedInner>>,
    delay: Duration,
    hook: Option<Arc<RunHook>>,
    unavailable: bool,
}

#[derive(Default)]
struct ScriptedInner {
    replies: VecDeque<ProcessOutput>,
    runs: Vec<RecordedRun>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the output for the next call.
    pub fn reply(self, output: ProcessOutput) -> Self {
        if let Ok(mut inner) = self.inner.lock() {
            inner.replies.push_back(output);
        }
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Called at the start of every run, before the delay.
    pub fn on_run(mut self, hook: impl Fn(&GenerationCommand) + Send + Sync + 'static) -> Self {
        self.hook = Some(Arc::new(Box::new(hook)));
        self
    }

    /// Behave as if the program were not installed.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    pub fn runs(&self) -> Vec<RecordedRun> {
        self.inner.lock().map(|i| i.runs.clone()).unwrap_or_default()
    }

    pub fn commands(&self) -> Vec<GenerationCommand> {
        self.runs().into_iter().map(|r| r.command).collect()
    }

    fn lock_error() -> CrudgenError {
        CrudgenError::Internal {
            message: "scripted runner lock poisoned".into(),
        }
    }
}

#[async_trait]
impl ProcessRunner for ScriptedRunner {
    async fn run(&self, command: &GenerationCommand) -> CrudgenResult<ProcessOutput> {
        if self.unavailable {
            return Err(ApplicationError::GeneratorUnavailable {
                program: command.program.clone(),
                reason: "No such file or directory (os error 2)".into(),
            }
            .into());
        }

        let started = Instant::now();
        if let Some(hook) = &self.hook {
            hook(command);
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let mut inner = self.inner.lock().map_err(|_| Self::lock_error())?;
        let output = inner.replies.pop_front().unwrap_or_else(ProcessOutput::success);
        inner.runs.push(RecordedRun {
            command: command.clone(),
            started,
            finished: Instant::now(),
        });
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_replies_in_order_then_succeeds() {
        let runner = ScriptedRunner::new().reply(ProcessOutput::failure(1, "bad"));
        let cmd = GenerationCommand::new("tygo").arg("generate");

        assert_eq!(runner.run(&cmd).await.unwrap().stderr, "bad");
        assert!(runner.run(&cmd).await.unwrap().is_success());
        assert_eq!(runner.commands().len(), 2);
    }

    #[tokio::test]
    async fn missing_program_is_unavailable() {
        let cmd = GenerationCommand::new("crudgen-test-no-such-program-7f3a");
        let err = TokioProcessRunner::new().run(&cmd).await.unwrap_err();
        assert!(matches!(
            err,
            CrudgenError::Application(ApplicationError::GeneratorUnavailable { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_exit_code_and_stderr() {
        let cmd = GenerationCommand::new("sh")
            .arg("-c")
            .arg("echo oops >&2; exit 3");
        let out = TokioProcessRunner::new().run(&cmd).await.unwrap();
        assert_eq!(out.code, Some(3));
        assert_eq!(out.stderr.trim(), "oops");
    }
}
