use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::core::errors::Result;

/// A regular file discovered during traversal. Content is read on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    path: PathBuf,
    len: u64,
}

impl FileHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size in bytes as reported when the file was discovered.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reads the file and decodes it as UTF-8.
    pub fn read_text(&self) -> Result<String> {
        let bytes = fs::read(&self.path)?;
        Ok(String::from_utf8(bytes)?)
    }
}

/// Lazily enumerates every regular file below a root directory.
///
/// Entries are visited depth-first with siblings sorted by file name, so a fixed
/// directory snapshot always yields the same order. Unreadable directories and
/// entries that vanish mid-walk are skipped. Dropping the walker closes any
/// directory handles it still holds.
pub struct FileWalker {
    entries: walkdir::IntoIter,
}

impl FileWalker {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::with_follow_links(root, false)
    }

    pub fn with_follow_links(root: impl AsRef<Path>, follow_links: bool) -> Self {
        let entries = WalkDir::new(root.as_ref())
            .follow_links(follow_links)
            .sort_by_file_name()
            .into_iter();
        Self { entries }
    }
}

impl Iterator for FileWalker {
    type Item = FileHandle;

    fn next(&mut self) -> Option<FileHandle> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!("Walk error: {}", err);
                    continue;
                }
            };

            // With link following enabled this is the target's type. Otherwise a link
            // is resolved here so linked files are searched, but linked directories
            // are never descended into.
            let metadata = if entry.path_is_symlink() && !entry.file_type().is_file() {
                fs::metadata(entry.path())
            } else if entry.file_type().is_file() {
                entry.metadata().map_err(std::io::Error::from)
            } else {
                continue;
            };
            let len = match metadata {
                Ok(md) if md.is_file() => md.len(),
                Ok(_) => continue,
                Err(err) => {
                    tracing::debug!("Skipping {:?}: {}", entry.path(), err);
                    continue;
                }
            };

            return Some(FileHandle {
                path: entry.into_path(),
                len,
            });
        }
    }
}
