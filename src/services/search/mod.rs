//! Literal text search over a directory tree.
//!
//! - `line_index`: offset to line/column mapping
//! - `matcher`: overlapping literal substring search
//! - `session`: the per-run walk/match/emit loop
//! - `engine`: session hosting, cancellation and the shared event stream

pub mod cancel;
pub mod config;
pub mod engine;
pub mod events;
pub mod line_index;
pub mod matcher;
pub mod session;

pub use cancel::CancelToken;
pub use config::SearchEngineConfig;
pub use engine::SearchEngine;
pub use events::{SearchEvent, SearchEvents, SessionId, SessionStats, SessionStatus};
pub use line_index::{LineCol, LineIndex};
pub use matcher::{find_all, LiteralMatcher, Matches};
pub use session::relative_path;
