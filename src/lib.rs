//! Directory-scoped literal text search.
//!
//! A [`SearchEngine`] walks every regular file under a root directory, finds each
//! occurrence of a literal query and streams `(path, line, column)` locations back
//! to the caller while the scan is still running. Sessions can be cancelled at any
//! time; starting a new search cancels the one in flight.

pub mod core;
pub mod models;
pub mod services;

pub use crate::core::errors::{Error, Result};
pub use crate::models::match_location::MatchLocation;
pub use crate::models::search_request::SearchRequest;
pub use crate::services::search::{
    SearchEngine, SearchEngineConfig, SearchEvent, SearchEvents, SessionId, SessionStats,
    SessionStatus,
};
