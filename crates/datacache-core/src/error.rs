//! Error types for the data cache subsystem.

use thiserror::Error;

/// Data access error.
///
/// Absence of data is never an error; operations that can come up empty
/// return `Ok(None)` or an empty iterator instead. `CorruptArchive` is the
/// one recoverable variant: the archive cache logs it and reports the key as
/// missing rather than failing the caller.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Corrupt archive {key}: {reason}")]
    CorruptArchive { key: String, reason: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for data cache operations.
pub type DataResult<T> = Result<T, DataError>;
