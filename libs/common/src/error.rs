//! Custom error types for the common library
//!
//! This module defines the errors raised by the client-local storage
//! backends.

use thiserror::Error;

/// Custom error type for client-local storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the backing medium failed
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be encoded or decoded
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The key cannot be mapped onto the backing medium
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Another thread panicked while holding the storage lock
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Type alias for Result with StorageError
pub type StorageResult<T> = Result<T, StorageError>;
