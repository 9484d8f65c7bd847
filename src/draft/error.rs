//! Error types for draft persistence

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing the draft record
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("failed to access draft record at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize draft record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid storage key {0:?}: must be a plain file name")]
    InvalidKey(String),

    #[error("draft storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, DraftError>;
