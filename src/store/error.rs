use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not read progress file {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("progress file {path:?} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("could not write progress file {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("entry {index} {reason}")]
    InvalidKey { index: usize, reason: &'static str },
}

impl StoreError {
    /// Read, malformed-content and write failures. In-memory state is still
    /// valid when one of these comes back from a setter; it just isn't on disk.
    pub fn is_persistence(&self) -> bool {
        !matches!(self, StoreError::InvalidKey { .. })
    }
}
