//! Change source adapters.
//!
//! [`NotifyChangeSource`] watches the real filesystem through `notify`
//! with a `notify-debouncer-mini` front, so a burst of writes to one file
//! arrives as a single event. [`ScriptedChangeSource`] lets tests inject
//! events by hand.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crudgen_core::{
    application::{
        ApplicationError,
        ports::{ChangeEvent, ChangeSource, Subscription, SubscriptionRequest},
    },
    domain::{ChangeKind, entities::generation::normalize_target},
    error::{CrudgenError, CrudgenResult},
};
use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{DebounceEventResult, Debouncer, new_debouncer};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, trace, warn};
use uuid::Uuid;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Filesystem change notification backed by `notify`.
#[derive(Debug, Clone, Copy)]
pub struct NotifyChangeSource {
    debounce: Duration,
}

impl NotifyChangeSource {
    pub fn new() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

impl Default for NotifyChangeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeSource for NotifyChangeSource {
    fn subscribe(
        &self,
        request: SubscriptionRequest,
        events: UnboundedSender<ChangeEvent>,
    ) -> CrudgenResult<Box<dyn Subscription>> {
        let root =
            std::fs::canonicalize(request.root()).map_err(|e| watch_failed(request.root(), e))?;
        let targets = watch_targets(&request, &root);
        let channel = request.channel();

        let handler_root = root.clone();
        let mut debouncer = new_debouncer(self.debounce, move |result: DebounceEventResult| {
            match result {
                Ok(batch) => {
                    for event in batch {
                        let kind = if event.path.exists() {
                            ChangeKind::Changed
                        } else {
                            ChangeKind::Removed
                        };
                        let path = event
                            .path
                            .strip_prefix(&handler_root)
                            .map(Path::to_path_buf)
                            .unwrap_or(event.path);

                        if !request.accepts(&path, kind) {
                            trace!(path = %path.display(), "Ignoring change");
                            continue;
                        }
                        if events.send(ChangeEvent { channel, kind, path }).is_err() {
                            return;
                        }
                    }
                }
                Err(e) => warn!(error = %e, "Watcher error"),
            }
        })
        .map_err(|e| watch_failed(&root, e))?;

        for (path, mode) in targets {
            debouncer
                .watcher()
                .watch(&path, mode)
                .map_err(|e| watch_failed(&path, e))?;
            debug!(path = %path.display(), ?mode, "Watching");
        }

        Ok(Box::new(NotifySubscription {
            id: Uuid::new_v4().to_string(),
            _debouncer: debouncer,
        }))
    }
}

/// Paths to hand to the watcher. Missing source directories are skipped.
fn watch_targets(request: &SubscriptionRequest, root: &Path) -> Vec<(PathBuf, RecursiveMode)> {
    match request {
        SubscriptionRequest::Sources { paths, .. } => paths
            .iter()
            .filter_map(|p| {
                let full = root.join(normalize_target(p));
                if full.exists() {
                    Some((full, RecursiveMode::Recursive))
                } else {
                    warn!(path = %p, "Watch path does not exist, skipping");
                    None
                }
            })
            .collect(),
        // Watch the directory so replace-on-save editors keep working.
        SubscriptionRequest::ConfigFile { file, .. } => {
            let full = root.join(file);
            let dir = full.parent().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
            vec![(dir, RecursiveMode::NonRecursive)]
        }
    }
}

fn watch_failed(path: &Path, e: impl std::fmt::Display) -> CrudgenError {
    ApplicationError::WatchFailed {
        reason: format!("{}: {}", path.display(), e),
    }
    .into()
}

struct NotifySubscription {
    id: String,
    _debouncer: Debouncer<RecommendedWatcher>,
}

impl Subscription for NotifySubscription {
    fn id(&self) -> &str {
        &self.id
    }

    fn close(self: Box<Self>) {
        debug!(id = %self.id, "Stopping watcher");
    }
}

// ── Test double ──────────────────────────────────────────────────────────────

/// A change source driven by hand.
///
/// [`emit`](Self::emit) delivers an event to every open subscription whose
/// request accepts the path, exactly as the notify backend would after
/// filtering.
#[derive(Debug, Clone, Default)]
pub struct ScriptedChangeSource {
    inner: Arc<Mutex<ScriptedInner>>,
}

#[derive(Debug, Default)]
struct ScriptedInner {
    active: Vec<ActiveSubscription>,
    opened: usize,
    closed: usize,
}

#[derive(Debug)]
struct ActiveSubscription {
    id: String,
    request: SubscriptionRequest,
    events: UnboundedSender<ChangeEvent>,
}

impl ScriptedChangeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a change at `path` (relative to the project root). Returns
    /// how many subscriptions received it.
    pub fn emit(&self, path: impl AsRef<Path>, kind: ChangeKind) -> usize {
        let path = path.as_ref();
        let Ok(inner) = self.inner.lock() else {
            return 0;
        };
        inner
            .active
            .iter()
            .filter(|s| s.request.accepts(path, kind))
            .filter(|s| {
                s.events
                    .send(ChangeEvent {
                        channel: s.request.channel(),
                        kind,
                        path: path.to_path_buf(),
                    })
                    .is_ok()
            })
            .count()
    }

    /// Requests of the currently open subscriptions, in opening order.
    pub fn active(&self) -> Vec<SubscriptionRequest> {
        self.inner
            .lock()
            .map(|i| i.active.iter().map(|s| s.request.clone()).collect())
            .unwrap_or_default()
    }

    pub fn opened(&self) -> usize {
        self.inner.lock().map(|i| i.opened).unwrap_or(0)
    }

    pub fn closed(&self) -> usize {
        self.inner.lock().map(|i| i.closed).unwrap_or(0)
    }
}

impl ChangeSource for ScriptedChangeSource {
    fn subscribe(
        &self,
        request: SubscriptionRequest,
        events: UnboundedSender<ChangeEvent>,
    ) -> CrudgenResult<Box<dyn Subscription>> {
        let id = Uuid::new_v4().to_string();
        let mut inner = self.inner.lock().map_err(|_| CrudgenError::Internal {
            message: "scripted change source lock poisoned".into(),
        })?;
        inner.opened += 1;
        inner.active.push(ActiveSubscription {
            id: id.clone(),
            request,
            events,
        });

        Ok(Box::new(ScriptedSubscription {
            id,
            source: Arc::clone(&self.inner),
        }))
    }
}

struct ScriptedSubscription {
    id: String,
    source: Arc<Mutex<ScriptedInner>>,
}

impl Subscription for ScriptedSubscription {
    fn id(&self) -> &str {
        &self.id
    }

    fn close(self: Box<Self>) {
        if let Ok(mut inner) = self.source.lock() {
            inner.active.retain(|s| s.id != self.id);
            inner.closed += 1;
        }
    }
}
