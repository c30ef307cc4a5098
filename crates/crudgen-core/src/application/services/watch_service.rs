//! Watch Service - long-running regeneration driven by file changes.
//!
//! A [`WatchSupervisor`] owns one watch session for one generator kind:
//!
//! - a source subscription over the directories listed in the manifest
//! - a config subscription over the manifest itself
//! - the last-read [`WatchConfig`], used to tell real path changes from
//!   unrelated manifest edits
//!
//! Source events spawn a generation for the directory containing the
//! changed path. Generations run in a `JoinSet` so a manifest change can be
//! reconciled while one is still in flight; the generator's own lock keeps
//! them from overlapping each other. A failed generation is reported and
//! the session keeps going.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinSet;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    application::{
        ports::{
            ChangeEvent, ChangeSource, SilentReporter, Subscription, SubscriptionRequest,
            WatchChannel, WatchReporter,
        },
        services::{Generator, ManifestReader},
    },
    domain::{ChangeKind, GeneratorKind, ProjectLayout, SourceFilter, WatchConfig, WatchState},
    error::{CrudgenError, CrudgenResult},
};

pub struct WatchSupervisor {
    kind: GeneratorKind,
    project_root: PathBuf,
    manifest_file: PathBuf,
    filter: SourceFilter,

    generator: Arc<Generator>,
    manifest: Arc<ManifestReader>,
    source: Arc<dyn ChangeSource>,
    reporter: Arc<dyn WatchReporter>,

    state: WatchState,
    snapshot: Option<WatchConfig>,
    sources: Option<Box<dyn Subscription>>,
    config: Option<Box<dyn Subscription>>,

    events_tx: UnboundedSender<ChangeEvent>,
    events_rx: UnboundedReceiver<ChangeEvent>,
    in_flight: JoinSet<()>,
}

impl WatchSupervisor {
    pub fn new(
        generator: Arc<Generator>,
        manifest: Arc<ManifestReader>,
        source: Arc<dyn ChangeSource>,
        layout: &ProjectLayout,
        filter: SourceFilter,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            kind: generator.kind(),
            project_root: layout.root.clone(),
            manifest_file: layout.manifest.clone(),
            filter,
            generator,
            manifest,
            source,
            reporter: Arc::new(SilentReporter),
            state: WatchState::Idle,
            snapshot: None,
            sources: None,
            config: None,
            events_tx,
            events_rx,
            in_flight: JoinSet::new(),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn WatchReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    /// Paths of the current source subscription.
    pub fn watched_paths(&self) -> &[String] {
        self.snapshot.as_ref().map(WatchConfig::paths).unwrap_or_default()
    }

    /// Number of spawned generations not yet collected.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    // ── Transitions ──────────────────────────────────────────────────────────

    /// `Idle → Watching`: read the watch config and open both subscriptions.
    #[instrument(skip(self), fields(kind = %self.kind))]
    pub async fn start(&mut self) -> CrudgenResult<()> {
        if self.state != WatchState::Idle {
            return Err(CrudgenError::Internal {
                message: format!("watch session cannot start while {}", self.state),
            });
        }

        let config = self.manifest.watch_config(self.kind).await?;
        self.open_sources(&config)?;

        let request = SubscriptionRequest::ConfigFile {
            root: self.project_root.clone(),
            file: self.manifest_file.clone(),
        };
        match self.source.subscribe(request, self.events_tx.clone()) {
            Ok(sub) => self.config = Some(sub),
            Err(e) => {
                self.close_sources();
                return Err(e);
            }
        }

        info!(paths = ?config.paths(), "Watching");
        self.reporter.watching(self.kind, config.paths());
        self.snapshot = Some(config);
        self.state = WatchState::Watching;
        Ok(())
    }

    /// Route one event. Events arriving outside `Watching` are dropped.
    pub async fn handle(&mut self, event: ChangeEvent) -> CrudgenResult<()> {
        if self.state != WatchState::Watching {
            debug!(state = %self.state, path = %event.path.display(), "Dropping event");
            return Ok(());
        }

        match event.channel {
            WatchChannel::Sources => {
                self.trigger(&event.path);
                Ok(())
            }
            WatchChannel::Config if event.kind == ChangeKind::Removed => {
                debug!("Manifest removed, waiting for it to reappear");
                Ok(())
            }
            WatchChannel::Config => self.reconcile().await.map(|_| ()),
        }
    }

    /// `Watching → Reconciling → Watching`: swap the source subscription if
    /// the manifest's path list changed. Returns whether it did.
    ///
    /// Between closing the old subscription and opening the new one no
    /// source subscription is active. If the new one cannot be opened the
    /// previous paths are subscribed again.
    #[instrument(skip(self), fields(kind = %self.kind))]
    pub async fn reconcile(&mut self) -> CrudgenResult<bool> {
        self.state = WatchState::Reconciling;
        let result = self.swap_if_changed().await;
        self.state = WatchState::Watching;
        result
    }

    /// `→ ShuttingDown → Stopped`: close both subscriptions and let any
    /// in-flight generation run to completion.
    #[instrument(skip(self), fields(kind = %self.kind))]
    pub async fn shutdown(&mut self) {
        if self.state == WatchState::Stopped {
            return;
        }
        self.state = WatchState::ShuttingDown;

        self.close_sources();
        if let Some(sub) = self.config.take() {
            sub.close();
        }

        if !self.in_flight.is_empty() {
            info!(pending = self.in_flight.len(), "Waiting for running generations");
        }
        self.settle().await;

        self.state = WatchState::Stopped;
        self.reporter.stopped(self.kind);
        info!("Watch session stopped");
    }

    // ── Driving ──────────────────────────────────────────────────────────────

    /// Start if needed, then process events until `shutdown` resolves.
    pub async fn run<F>(&mut self, shutdown: F) -> CrudgenResult<()>
    where
        F: Future<Output = ()>,
    {
        if self.state == WatchState::Idle {
            self.start().await?;
        }
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    info!("Shutdown requested");
                    break;
                }
                Some(event) = self.events_rx.recv() => {
                    if let Err(e) = self.handle(event).await {
                        warn!(error = %e, "Could not apply manifest change");
                    }
                }
                Some(joined) = self.in_flight.join_next(), if !self.in_flight.is_empty() => {
                    if let Err(e) = joined {
                        error!(error = %e, "Generation task panicked");
                    }
                }
            }
        }

        self.shutdown().await;
        Ok(())
    }

    /// Handle every event already queued, without waiting for new ones.
    pub async fn process_pending(&mut self) -> CrudgenResult<usize> {
        let mut handled = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle(event).await?;
            handled += 1;
        }
        Ok(handled)
    }

    /// Wait for every spawned generation to finish.
    pub async fn settle(&mut self) {
        while let Some(joined) = self.in_flight.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "Generation task panicked");
            }
        }
    }

    // ── Internals ────────────────────────────────────────────────────────────

    async fn swap_if_changed(&mut self) -> CrudgenResult<bool> {
        let fresh = self.manifest.watch_config(self.kind).await?;

        let unchanged = self
            .snapshot
            .as_ref()
            .is_some_and(|current| current.snapshot() == fresh.snapshot());
        if unchanged {
            debug!("Manifest changed but watch paths did not");
            return Ok(false);
        }

        info!(paths = ?fresh.paths(), "Watch paths changed, resubscribing");
        self.close_sources();
        if let Err(e) = self.open_sources(&fresh) {
            self.restore_sources();
            return Err(e);
        }
        self.reporter.config_changed(self.kind, fresh.paths());
        self.snapshot = Some(fresh);
        Ok(true)
    }

    fn open_sources(&mut self, config: &WatchConfig) -> CrudgenResult<()> {
        let request = SubscriptionRequest::Sources {
            root: self.project_root.clone(),
            paths: config.paths().to_vec(),
            filter: self.filter.clone(),
        };
        let sub = self.source.subscribe(request, self.events_tx.clone())?;
        debug!(id = sub.id(), "Opened source subscription");
        self.sources = Some(sub);
        Ok(())
    }

    /// Reopen the snapshot's paths after a failed swap. If that fails too,
    /// the snapshot is dropped so the next manifest event resubscribes.
    fn restore_sources(&mut self) {
        let Some(previous) = self.snapshot.clone() else {
            return;
        };
        match self.open_sources(&previous) {
            Ok(()) => warn!(paths = ?previous.paths(), "Keeping previous watch paths"),
            Err(e) => {
                error!(error = %e, "Could not reopen previous watch paths");
                self.snapshot = None;
            }
        }
    }

    fn close_sources(&mut self) {
        if let Some(sub) = self.sources.take() {
            debug!(id = sub.id(), "Closing source subscription");
            sub.close();
        }
    }

    fn trigger(&mut self, changed: &Path) {
        self.reporter.change_detected(changed);

        let target = match changed.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_string_lossy().replace('\\', "/"),
            _ => ".".to_string(),
        };
        info!(path = %changed.display(), dir = %target, "Change detected");

        let generator = Arc::clone(&self.generator);
        let reporter = Arc::clone(&self.reporter);
        self.in_flight.spawn(async move {
            match generator.generate(&target).await {
                Ok(report) => reporter.generated(report.kind, &report.output),
                Err(e) => {
                    warn!(dir = %target, error = %e, "Generation failed");
                    reporter.generation_failed(&target, &e);
                }
            }
        });
    }
}
