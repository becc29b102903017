use std::path::{Path, PathBuf};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::{
    mpsc::{self, UnboundedReceiver, UnboundedSender},
    watch,
};
use tracing::{debug, error, info, warn};

use crate::{
    application::services::notifier::{NotifyOutcome, Notifier},
    domain::{
        entities::notification_state::NotificationState,
        events::log_changed::{LogChangedEvent, is_write},
        ports::{log_source::LogSource, message_transport::MessageTransport},
        services::record_parser::RecordParser,
        value_objects::watch_target::WatchTarget,
    },
    shared::error::{PipelineError, SetupError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherPhase {
    Idle,
    Armed,
    Firing,
    Stopped,
}

/// Filesystem subscription that is released when dropped.
struct WatchHandle {
    watcher: RecommendedWatcher,
    path: PathBuf,
}

impl WatchHandle {
    fn subscribe(
        path: &Path,
        events: UnboundedSender<Event>,
        errors: UnboundedSender<notify::Error>,
    ) -> Result<Self, SetupError> {
        let subscribe_error = |source| SetupError::Subscribe {
            path: path.to_path_buf(),
            source,
        };

        let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
            // The receivers only go away once the drain loop has stopped.
            let _ = match result {
                Ok(event) => events.send(event).map_err(drop),
                Err(e) => errors.send(e).map_err(drop),
            };
        })
        .map_err(subscribe_error)?;
        watcher
            .watch(path, RecursiveMode::NonRecursive)
            .map_err(subscribe_error)?;

        Ok(Self {
            watcher,
            path: path.to_path_buf(),
        })
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        if let Err(e) = self.watcher.unwatch(&self.path) {
            debug!(path = %self.path.display(), "unwatch failed: {}", e);
        }
        info!(path = %self.path.display(), "released file watch");
    }
}

/// Turns write events on the watched path into notifications, one event at a
/// time in arrival order.
pub struct ChangeWatcher<S, T> {
    source: S,
    notifier: Notifier<T>,
    state: NotificationState,
    phase: WatcherPhase,
}

impl<S: LogSource, T: MessageTransport> ChangeWatcher<S, T> {
    pub fn new(source: S, notifier: Notifier<T>) -> Self {
        Self {
            source,
            notifier,
            state: NotificationState::new(),
            phase: WatcherPhase::Idle,
        }
    }

    pub fn phase(&self) -> WatcherPhase {
        self.phase
    }

    pub fn state(&self) -> &NotificationState {
        &self.state
    }

    /// Subscribes to `target` and processes events until `shutdown` fires.
    ///
    /// Only a failed subscription is returned as an error; everything that
    /// goes wrong while handling an event is logged and the loop continues.
    pub async fn run(
        &mut self,
        target: &WatchTarget,
        shutdown: watch::Receiver<bool>,
    ) -> Result<(), SetupError> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (error_tx, error_rx) = mpsc::unbounded_channel();

        let handle = match WatchHandle::subscribe(target.path(), event_tx, error_tx) {
            Ok(handle) => handle,
            Err(e) => {
                self.phase = WatcherPhase::Stopped;
                return Err(e);
            }
        };
        info!(path = %target.path().display(), "watching for changes");

        self.drain(target, event_rx, error_rx, shutdown).await;
        drop(handle);
        Ok(())
    }

    /// Event loop over already subscribed channels.
    pub async fn drain(
        &mut self,
        target: &WatchTarget,
        mut events: UnboundedReceiver<Event>,
        mut errors: UnboundedReceiver<notify::Error>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        self.phase = WatcherPhase::Armed;

        while !*shutdown.borrow() {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        debug!("shutdown sender dropped");
                        break;
                    }
                }
                event = events.recv() => match event {
                    Some(event) => {
                        let (latest, coalesced) = coalesce_pending(event, &mut events);
                        if coalesced > 0 {
                            debug!(coalesced, "coalesced queued events");
                        }
                        self.handle_event(target, &latest).await;
                    }
                    None => {
                        warn!("file watch event channel closed");
                        break;
                    }
                },
                Some(e) = errors.recv() => {
                    warn!("error watching files: {}", e);
                }
            }
        }

        info!("change watcher stopped");
        self.phase = WatcherPhase::Stopped;
    }

    /// Runs the pipeline for a write event; returns `None` for ignored events.
    pub async fn handle_event(
        &mut self,
        target: &WatchTarget,
        event: &Event,
    ) -> Option<Result<NotifyOutcome, PipelineError>> {
        let Some(changed) = LogChangedEvent::from_notify(event, target.path()) else {
            debug!(kind = ?event.kind, "ignoring event");
            return None;
        };

        self.phase = WatcherPhase::Firing;
        info!(path = %changed.path.display(), at = %changed.timestamp, "modified file");

        let result = self.fire(target).await;
        if let Err(e) = &result {
            log_pipeline_error(e);
        }

        self.phase = WatcherPhase::Armed;
        Some(result)
    }

    async fn fire(&mut self, target: &WatchTarget) -> Result<NotifyOutcome, PipelineError> {
        let content = self.source.fetch_content().await?;
        let record = RecordParser::parse(&content)?;
        debug!(?record, "parsed record");
        let outcome = self
            .notifier
            .notify(&record, target.webhook_url(), &mut self.state)
            .await?;
        Ok(outcome)
    }
}

/// Folds every event already queued behind `first` into one, keeping the
/// newest write so a burst costs a single fetch.
fn coalesce_pending(first: Event, events: &mut UnboundedReceiver<Event>) -> (Event, usize) {
    let mut latest = first;
    let mut coalesced = 0;
    while let Ok(next) = events.try_recv() {
        if is_write(&next.kind) || !is_write(&latest.kind) {
            latest = next;
        }
        coalesced += 1;
    }
    (latest, coalesced)
}

fn log_pipeline_error(e: &PipelineError) {
    match e {
        PipelineError::Fetch(e) => {
            warn!(container_error = %e, "failed to fetch log content, event dropped");
        }
        PipelineError::Parse(e) => {
            warn!(
                line = e.line().unwrap_or_default(),
                "failed to parse log record, event dropped: {}", e
            );
        }
        PipelineError::Notify(e) => {
            error!("failed to send notification: {}", e);
        }
    }
}
