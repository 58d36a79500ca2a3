use std::path::{Path, PathBuf};

use crate::core::errors::{Error, Result};

/// Defines a search request.
///
/// A request is validated before a session is created; once a session starts it
/// owns its copy and never changes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub root: PathBuf,
    pub query: String,
    /// Directory reported paths are made relative to. Defaults to `root`.
    pub base_dir: Option<PathBuf>,
}

impl SearchRequest {
    pub fn new(root: impl Into<PathBuf>, query: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            query: query.into(),
            base_dir: None,
        }
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Directory used to relativize result paths.
    pub fn base_dir(&self) -> &Path {
        self.base_dir.as_deref().unwrap_or(&self.root)
    }

    /// Rejects empty inputs and roots that are not existing directories.
    pub fn validate(&self) -> Result<()> {
        if self.root.as_os_str().is_empty() {
            return Err(Error::EmptyDirectory);
        }
        if self.query.is_empty() {
            return Err(Error::EmptyQuery);
        }
        if !self.root.is_dir() {
            return Err(Error::DirectoryNotFound(self.root.clone()));
        }
        Ok(())
    }
}
