use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("search query is empty")]
    EmptyQuery,
    #[error("directory path is empty")]
    EmptyDirectory,
    #[error("directory does not exist: {0}")]
    DirectoryNotFound(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("file is not valid utf-8: {0}")]
    Decode(#[from] FromUtf8Error),
}

impl Error {
    /// True for errors that reject a request before any session starts.
    pub fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            Error::EmptyQuery | Error::EmptyDirectory | Error::DirectoryNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_errors_are_flagged() {
        assert!(Error::EmptyQuery.is_invalid_request());
        assert!(Error::DirectoryNotFound(PathBuf::from("/nope")).is_invalid_request());
        let io = Error::from(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(!io.is_invalid_request());
    }
}
