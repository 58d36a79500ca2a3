use serde::Serialize;
use tokio::sync::mpsc;

use crate::models::match_location::MatchLocation;

/// Identifies one session within an engine. Increases with every `start`.
pub type SessionId = u64;

/// Lifecycle of a search session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl SessionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::Cancelled)
    }
}

/// Counters reported when a session finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub matches: usize,
}

/// Messages delivered to the result consumer.
///
/// Each session produces one `Started`, any number of `Match` events in walk
/// order, then exactly one `Finished`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SearchEvent {
    Started {
        session_id: SessionId,
    },
    Match {
        session_id: SessionId,
        location: MatchLocation,
    },
    Finished {
        session_id: SessionId,
        status: SessionStatus,
        stats: SessionStats,
    },
}

impl SearchEvent {
    pub fn session_id(&self) -> SessionId {
        match self {
            SearchEvent::Started { session_id }
            | SearchEvent::Match { session_id, .. }
            | SearchEvent::Finished { session_id, .. } => *session_id,
        }
    }
}

/// Receiving half of an engine's event stream.
pub type SearchEvents = mpsc::Receiver<SearchEvent>;
