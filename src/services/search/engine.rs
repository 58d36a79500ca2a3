use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use super::cancel::CancelToken;
use super::config::SearchEngineConfig;
use super::events::{SearchEvent, SearchEvents, SessionId, SessionStats, SessionStatus};
use super::session::SessionWorker;
use crate::core::errors::Result;
use crate::models::search_request::SearchRequest;

struct ActiveSession {
    id: SessionId,
    cancel: CancelToken,
    status: watch::Receiver<SessionStatus>,
    task: JoinHandle<()>,
}

/// Hosts at most one running search session and streams its results.
///
/// All sessions share one event stream, returned from [`SearchEngine::new`]. Starting a
/// session while another runs cancels the old one; its `Finished` event is delivered
/// before the new session's `Started`.
pub struct SearchEngine {
    runtime: Handle,
    config: SearchEngineConfig,
    events: mpsc::Sender<SearchEvent>,
    next_id: AtomicU64,
    active: Mutex<Option<ActiveSession>>,
}

impl SearchEngine {
    pub fn new(runtime: Handle, config: SearchEngineConfig) -> (Self, SearchEvents) {
        let (events, rx) = mpsc::channel(config.channel_capacity.max(1));
        let engine = Self {
            runtime,
            config,
            events,
            next_id: AtomicU64::new(1),
            active: Mutex::new(None),
        };
        (engine, rx)
    }

    /// Validates the request and begins a session in the background.
    ///
    /// Returns as soon as the session is scheduled. Invalid requests fail here and
    /// never produce events.
    pub fn start(&self, request: SearchRequest) -> Result<SessionId> {
        request.validate()?;
        let request = absolutize(request)?;

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let cancel = CancelToken::new();
        let (status_tx, status_rx) = watch::channel(SessionStatus::Running);

        let mut active = self.lock_active();
        let previous = active.take().map(|previous| {
            if !previous.status.borrow().is_terminal() {
                tracing::info!("Search session {} superseded by {}", previous.id, id);
            }
            previous.cancel.cancel();
            previous.task
        });

        tracing::info!(
            "Starting search session {} for {:?} in {:?}",
            id,
            request.query,
            request.root
        );
        let worker = SessionWorker::new(
            id,
            request,
            self.config.clone(),
            cancel.clone(),
            self.events.clone(),
            self.runtime.clone(),
        );
        let task = self
            .runtime
            .spawn(drive_session(id, worker, previous, self.events.clone(), status_tx));

        *active = Some(ActiveSession {
            id,
            cancel,
            status: status_rx,
            task,
        });
        Ok(id)
    }

    /// Requests cancellation of the running session. No-op when nothing is running.
    pub fn cancel(&self) {
        let active = self.lock_active();
        if let Some(session) = active.as_ref() {
            if !session.status.borrow().is_terminal() {
                tracing::info!("Cancelling search session {}", session.id);
                session.cancel.cancel();
            }
        }
    }

    /// Cancels the running session and waits until it reaches a terminal state.
    pub async fn cancel_and_wait(&self) -> SessionStatus {
        self.cancel();
        self.wait().await
    }

    /// Waits for the most recent session to reach a terminal state, or returns `Idle`
    /// if none was ever started.
    ///
    /// Does not require the event stream to be drained. The terminal status is
    /// published before the session's `Finished` event is queued, so `Finished` may
    /// still be pending in the stream when this returns.
    pub async fn wait(&self) -> SessionStatus {
        let status = self
            .lock_active()
            .as_ref()
            .map(|session| session.status.clone());

        match status {
            Some(mut status) => match status.wait_for(|s| s.is_terminal()).await {
                Ok(terminal) => *terminal,
                Err(_) => SessionStatus::Cancelled,
            },
            None => SessionStatus::Idle,
        }
    }

    /// Status of the most recent session, or `Idle` if none was ever started.
    pub fn status(&self) -> SessionStatus {
        self.lock_active()
            .as_ref()
            .map_or(SessionStatus::Idle, |session| *session.status.borrow())
    }

    /// Id of the session currently running, if any.
    pub fn running_session(&self) -> Option<SessionId> {
        self.lock_active()
            .as_ref()
            .filter(|session| !session.status.borrow().is_terminal())
            .map(|session| session.id)
    }

    fn lock_active(&self) -> MutexGuard<'_, Option<ActiveSession>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn absolutize(mut request: SearchRequest) -> Result<SearchRequest> {
    request.root = std::path::absolute(&request.root)?;
    if let Some(base_dir) = request.base_dir.take() {
        request.base_dir = Some(std::path::absolute(base_dir)?);
    }
    Ok(request)
}

async fn drive_session(
    id: SessionId,
    worker: SessionWorker,
    previous: Option<JoinHandle<()>>,
    events: mpsc::Sender<SearchEvent>,
    status: watch::Sender<SessionStatus>,
) {
    if let Some(previous) = previous {
        if let Err(err) = previous.await {
            tracing::error!("Previous search session task failed: {}", err);
        }
    }

    let (final_status, stats) = if events
        .send(SearchEvent::Started { session_id: id })
        .await
        .is_err()
    {
        (SessionStatus::Cancelled, SessionStats::default())
    } else {
        match tokio::task::spawn_blocking(move || worker.run()).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!("Search session {} worker failed: {}", id, err);
                (SessionStatus::Cancelled, SessionStats::default())
            }
        }
    };

    // Published before `Finished` is queued: waiters must not depend on the consumer
    // draining a full channel.
    status.send_replace(final_status);
    let finished = SearchEvent::Finished {
        session_id: id,
        status: final_status,
        stats,
    };
    if events.send(finished).await.is_err() {
        tracing::warn!("Result receiver dropped before session {} finished", id);
    }

    tracing::info!(
        "Search session {} {:?}: {} matches in {} files ({} skipped)",
        id,
        final_status,
        stats.matches,
        stats.files_scanned,
        stats.files_skipped
    );
}
