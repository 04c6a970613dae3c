//! Error taxonomy for the clipshelf core.
//!
//! Corrupt history lines and a missing backing file are not errors at all:
//! the store recovers from both locally. What remains is clipboard
//! capability failures and genuine I/O failures during a persist.

use thiserror::Error;

/// Failure of the OS clipboard capability.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard read failed: {0}")]
    Read(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
}

/// Failure of a history store operation.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Writing the backing file failed (disk full, permissions). Surfaced
    /// to the operator; there is no partial-write recovery beyond the
    /// codec's fail-soft decode on the next read.
    #[error("history file error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
    /// Empty text is never stored; stored entries always have a value.
    #[error("refusing to promote an empty value")]
    EmptyValue,
}
