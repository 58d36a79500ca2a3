use std::path::Path;

use tokio::runtime::Handle;
use tokio::sync::mpsc;

use super::cancel::CancelToken;
use super::config::SearchEngineConfig;
use super::events::{SearchEvent, SessionId, SessionStats, SessionStatus};
use super::line_index::LineIndex;
use super::matcher::LiteralMatcher;
use crate::core::errors::Result;
use crate::models::match_location::MatchLocation;
use crate::models::search_request::SearchRequest;
use crate::services::fs::walker::{FileHandle, FileWalker};

enum FileOutcome {
    Scanned,
    Skipped,
    Stopped,
}

/// The blocking half of a session: walks, matches and emits until done or cancelled.
pub(crate) struct SessionWorker {
    id: SessionId,
    request: SearchRequest,
    matcher: LiteralMatcher,
    config: SearchEngineConfig,
    cancel: CancelToken,
    events: mpsc::Sender<SearchEvent>,
    runtime: Handle,
}

impl SessionWorker {
    pub(crate) fn new(
        id: SessionId,
        request: SearchRequest,
        config: SearchEngineConfig,
        cancel: CancelToken,
        events: mpsc::Sender<SearchEvent>,
        runtime: Handle,
    ) -> Self {
        let matcher = LiteralMatcher::new(&request.query);
        Self {
            id,
            request,
            matcher,
            config,
            cancel,
            events,
            runtime,
        }
    }

    /// Runs on a blocking thread. Never fails: per-file problems are counted as skips.
    pub(crate) fn run(self) -> (SessionStatus, SessionStats) {
        let mut stats = SessionStats::default();
        let walker = FileWalker::with_follow_links(&self.request.root, self.config.follow_links);

        for file in walker {
            if self.cancel.is_cancelled() {
                return (SessionStatus::Cancelled, stats);
            }

            match self.search_file(&file, &mut stats) {
                Ok(FileOutcome::Scanned) => stats.files_scanned += 1,
                Ok(FileOutcome::Skipped) => stats.files_skipped += 1,
                Ok(FileOutcome::Stopped) => return (SessionStatus::Cancelled, stats),
                Err(err) => {
                    tracing::debug!("Skipping {:?}: {}", file.path(), err);
                    stats.files_skipped += 1;
                }
            }
        }

        // A cancel that lands after the last per-file check still wins.
        if self.cancel.is_cancelled() {
            return (SessionStatus::Cancelled, stats);
        }
        (SessionStatus::Completed, stats)
    }

    fn search_file(&self, file: &FileHandle, stats: &mut SessionStats) -> Result<FileOutcome> {
        if let Some(max) = self.config.max_file_size {
            if file.len() > max {
                tracing::debug!("Skipping large file: {:?}", file.path());
                return Ok(FileOutcome::Skipped);
            }
        }

        let text = file.read_text()?;
        let mut offsets = self.matcher.find_all(&text).peekable();
        if offsets.peek().is_none() {
            return Ok(FileOutcome::Scanned);
        }

        let index = LineIndex::build(&text);
        let relative_path = relative_path(file.path(), self.request.base_dir());

        for offset in offsets {
            if self.cancel.is_cancelled() {
                return Ok(FileOutcome::Stopped);
            }

            let position = index.locate_chars(&text, offset);
            let event = SearchEvent::Match {
                session_id: self.id,
                location: MatchLocation {
                    relative_path: relative_path.clone(),
                    line: position.line,
                    column: position.column,
                },
            };
            if !self.emit(event) {
                return Ok(FileOutcome::Stopped);
            }
            stats.matches += 1;
        }

        Ok(FileOutcome::Scanned)
    }

    /// Sends one event, waiting for channel space. Returns false if the session was
    /// cancelled while waiting or the receiver is gone.
    fn emit(&self, event: SearchEvent) -> bool {
        self.runtime.block_on(async {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => false,
                sent = self.events.send(event) => match sent {
                    Ok(()) => true,
                    Err(_) => {
                        tracing::warn!("Result receiver dropped, stopping session {}", self.id);
                        false
                    }
                },
            }
        })
    }
}

/// Path of `path` relative to `base`, or `path` itself when no relative form exists.
pub fn relative_path(path: &Path, base: &Path) -> String {
    pathdiff::diff_paths(path, base)
        .unwrap_or_else(|| path.to_path_buf())
        .to_string_lossy()
        .into_owned()
}
